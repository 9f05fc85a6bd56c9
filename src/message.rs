use serde_json::Value;

pub use agent_api::FeedbackKind as Feedback;
use agent_api::HistoryMessage;
use agent_response::ContentBlock;

/// Reserved sentinel id for a locally-created message whose server-assigned
/// identifier is not yet known. At most one message per conversation may
/// carry it at any time; the edit coordinator resolves it against refreshed
/// history before any further operation touches the message.
pub const PLACEHOLDER_MESSAGE_ID: &str = "__pending-resend__";

/// One entry in the ordered message log.
///
/// Insertion order is chronological order; timestamps are refreshed on every
/// mutation but never used for ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_bot: bool,
    /// In-progress agent output, subject to in-place overwrite.
    pub is_partial: bool,
    pub timestamp_ms: i64,
    pub conversation_id: String,
    pub references: Vec<Value>,
    pub feedback: Option<Feedback>,
}

impl Message {
    pub fn user(
        id: impl Into<String>,
        content: impl Into<String>,
        conversation_id: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            is_bot: false,
            is_partial: false,
            timestamp_ms,
            conversation_id: conversation_id.into(),
            references: Vec::new(),
            feedback: None,
        }
    }

    pub fn partial_bot(
        id: impl Into<String>,
        content: impl Into<String>,
        conversation_id: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            is_bot: true,
            is_partial: true,
            ..Self::user(id, content, conversation_id, timestamp_ms)
        }
    }

    pub fn complete_bot(
        id: impl Into<String>,
        content: impl Into<String>,
        conversation_id: impl Into<String>,
        references: Vec<Value>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            is_bot: true,
            references,
            ..Self::user(id, content, conversation_id, timestamp_ms)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_MESSAGE_ID
    }

    /// Structured blocks embedded in this message's content, when it carries
    /// a delimited agent-response payload. `None` for user messages and for
    /// plain-text replies; render those as-is.
    pub fn content_blocks(&self) -> Option<Vec<ContentBlock>> {
        if !self.is_bot {
            return None;
        }
        agent_response::parse(&self.content)
    }

    /// Build a log entry from a server history record.
    pub fn from_history(record: HistoryMessage, conversation_id: &str) -> Self {
        Self {
            id: record.message_id,
            content: record.content,
            is_bot: record.role == "AI",
            is_partial: false,
            timestamp_ms: record.timestamp_ms,
            conversation_id: conversation_id.to_string(),
            references: record.references,
            feedback: None,
        }
    }
}

/// Conversation metadata as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub summary: String,
    pub timestamp_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::{Message, PLACEHOLDER_MESSAGE_ID};
    use agent_api::HistoryMessage;

    #[test]
    fn history_record_maps_ai_role_to_bot() {
        let record = HistoryMessage {
            message_id: "m1".to_string(),
            content: "hello".to_string(),
            role: "AI".to_string(),
            timestamp_ms: 42,
            references: Vec::new(),
        };
        let message = Message::from_history(record, "conv-1");

        assert!(message.is_bot);
        assert!(!message.is_partial);
        assert_eq!(message.conversation_id, "conv-1");
    }

    #[test]
    fn placeholder_detection_is_exact() {
        let message = Message::user(PLACEHOLDER_MESSAGE_ID, "edited", "conv-1", 0);
        assert!(message.is_placeholder());

        let message = Message::user("m1", "edited", "conv-1", 0);
        assert!(!message.is_placeholder());
    }

    #[test]
    fn content_blocks_only_parse_structured_bot_output() {
        let payload = r#"<AutoAgentResponse>[{"role":"assistant","content":[{"type":"text","text":"hi"}]}]</AutoAgentResponse>"#;

        let bot = Message::complete_bot("m1", payload, "conv-1", Vec::new(), 0);
        let blocks = bot.content_blocks().expect("payload should parse");
        assert_eq!(blocks.len(), 1);

        let plain = Message::complete_bot("m2", "just text", "conv-1", Vec::new(), 0);
        assert!(plain.content_blocks().is_none());

        let user = Message::user("m3", payload, "conv-1", 0);
        assert!(user.content_blocks().is_none());
    }

    #[test]
    fn constructors_set_lifecycle_flags() {
        let partial = Message::partial_bot("m1", "He", "conv-1", 1);
        assert!(partial.is_bot && partial.is_partial);

        let complete = Message::complete_bot("m1", "Hello!", "conv-1", Vec::new(), 2);
        assert!(complete.is_bot && !complete.is_partial);
    }
}
