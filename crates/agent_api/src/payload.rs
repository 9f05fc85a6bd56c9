use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolved `(project, agent)` pair every chat-surface route is scoped by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentScope {
    pub project_id: String,
    pub agent_id: String,
}

impl AgentScope {
    pub fn new(project_id: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            agent_id: agent_id.into(),
        }
    }
}

/// Standard `{ result: … }` envelope both surfaces wrap responses in.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[allow(dead_code)]
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<u16>,
    pub result: T,
}

/// One entry from the conversation listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConversationRecord {
    #[serde(rename = "ConversationId")]
    pub id: String,
    #[serde(rename = "Summary", default)]
    pub summary: String,
    #[serde(rename = "CreatedAt", default)]
    pub created_at_ms: i64,
}

/// One entry from the conversation history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryMessage {
    #[serde(rename = "MessageId")]
    pub message_id: String,
    #[serde(rename = "Content")]
    pub content: String,
    /// Raw backend role tag; `"AI"` marks agent output.
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp_ms: i64,
    #[serde(rename = "References", default)]
    pub references: Vec<Value>,
}

impl HistoryMessage {
    pub fn is_bot(&self) -> bool {
        self.role == "AI"
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryWire {
    pub history: Vec<HistoryMessage>,
}

/// One poll of the stream endpoint, flattened from the nested wire shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamSnapshot {
    pub completed: bool,
    /// Generated text so far; absent while the server has produced nothing.
    pub generated: Option<String>,
    pub references: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamWire {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub result: Option<GeneratedWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedWire {
    #[serde(rename = "Generated Result", default)]
    pub generated_result: Option<String>,
    #[serde(rename = "References", default)]
    pub references: Vec<Value>,
}

impl From<StreamWire> for StreamSnapshot {
    fn from(wire: StreamWire) -> Self {
        let (generated, references) = match wire.result {
            Some(body) => (body.generated_result, body.references),
            None => (None, Vec::new()),
        };
        Self {
            completed: wire.completed,
            generated,
            references,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateConversationRequest<'a> {
    pub summary: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedConversation {
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
}

/// Feedback verdict recorded against a generated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Good,
    Bad,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Bad => "bad",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FeedbackSubmission<'a> {
    #[serde(rename = "UserId")]
    pub user_id: &'a str,
    #[serde(rename = "ConversationId")]
    pub conversation_id: &'a str,
    #[serde(rename = "MessageId")]
    pub message_id: &'a str,
    #[serde(rename = "Feedback")]
    pub feedback: FeedbackKind,
    #[serde(rename = "AdditionalFeedback")]
    pub additional_feedback: &'a str,
    /// Seconds since the epoch; the feedback route expects second resolution.
    #[serde(rename = "Timestamp")]
    pub timestamp_s: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrgRecord {
    #[serde(rename = "OrgId")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRecord {
    #[serde(rename = "ProjectId")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentRecord {
    #[serde(rename = "AgentId")]
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateOrgRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateProjectRequest<'a> {
    #[serde(rename = "orgId")]
    pub org_id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedOrg {
    #[serde(rename = "orgId")]
    pub org_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedProject {
    #[serde(rename = "projectId")]
    pub project_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedAgent {
    #[serde(rename = "agentId")]
    pub agent_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AgentStatusWire {
    pub message: String,
}
