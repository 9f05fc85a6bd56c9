use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AgentApiConfig;
use crate::error::{parse_error_message, AgentApiError};
use crate::payload::{
    AgentRecord, AgentScope, AgentStatusWire, ConversationRecord, CreateConversationRequest,
    CreateOrgRequest, CreateProjectRequest, CreatedAgent, CreatedConversation, CreatedOrg,
    CreatedProject, Envelope, FeedbackKind, FeedbackSubmission, HistoryMessage, HistoryWire,
    OrgRecord, ProjectRecord, SendMessageRequest, StreamSnapshot, StreamWire,
};
use crate::url;

#[derive(Debug)]
pub struct AgentApiClient {
    http: Client,
    config: AgentApiConfig,
    chat_base: String,
    resources_base: String,
}

impl AgentApiClient {
    pub fn new(config: AgentApiConfig) -> Result<Self, AgentApiError> {
        let mut builder = Client::builder().default_headers(build_headers(&config)?);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AgentApiError::from)?;
        let chat_base = url::normalize_base_url(&config.chat_base_url, url::DEFAULT_CHAT_BASE_URL);
        let resources_base = url::normalize_base_url(
            &config.resources_base_url,
            url::DEFAULT_RESOURCES_BASE_URL,
        );
        Ok(Self {
            http,
            config,
            chat_base,
            resources_base,
        })
    }

    pub fn config(&self) -> &AgentApiConfig {
        &self.config
    }

    pub fn user_id(&self) -> &str {
        &self.config.user_id
    }

    // --- chat surface ---

    pub async fn list_conversations(
        &self,
        scope: &AgentScope,
    ) -> Result<Vec<ConversationRecord>, AgentApiError> {
        let url = url::conversations_url(&self.chat_base, scope);
        let envelope: Envelope<Vec<ConversationRecord>> = self.get_json(&url).await?;
        Ok(envelope.result)
    }

    pub async fn create_conversation(
        &self,
        scope: &AgentScope,
        summary: &str,
    ) -> Result<String, AgentApiError> {
        let url = url::conversation_create_url(&self.chat_base, scope);
        let envelope: Envelope<CreatedConversation> = self
            .post_json(&url, &CreateConversationRequest { summary })
            .await?;
        Ok(envelope.result.conversation_id)
    }

    pub async fn conversation_history(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
    ) -> Result<Vec<HistoryMessage>, AgentApiError> {
        let url = url::conversation_history_url(&self.chat_base, scope, conversation_id);
        let envelope: Envelope<HistoryWire> = self.get_json(&url).await?;
        Ok(envelope.result.history)
    }

    pub async fn delete_conversation(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
    ) -> Result<(), AgentApiError> {
        let url = url::conversation_delete_url(&self.chat_base, scope, conversation_id);
        self.delete(&url).await
    }

    /// Submit a user message; returns the server-issued id for the
    /// generation this message triggers.
    pub async fn send_message(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message: &str,
    ) -> Result<String, AgentApiError> {
        let url = url::chat_url(&self.chat_base, scope, conversation_id);
        let envelope: Envelope<String> =
            self.post_json(&url, &SendMessageRequest { message }).await?;
        Ok(envelope.result)
    }

    /// Poll the generation stream once.
    pub async fn stream_message(
        &self,
        scope: &AgentScope,
        message_id: &str,
    ) -> Result<StreamSnapshot, AgentApiError> {
        let url = url::stream_url(&self.chat_base, scope, message_id);
        let envelope: Envelope<StreamWire> = self.get_json(&url).await?;
        Ok(envelope.result.into())
    }

    /// Delete a message and every message after it in server-side history.
    pub async fn delete_from_message(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<(), AgentApiError> {
        let url = url::chat_delete_url(&self.chat_base, scope, conversation_id, message_id);
        self.delete(&url).await
    }

    pub async fn send_feedback(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message_id: &str,
        feedback: FeedbackKind,
        timestamp_s: i64,
    ) -> Result<(), AgentApiError> {
        let url = url::feedback_url(&self.chat_base, scope, conversation_id);
        let submission = FeedbackSubmission {
            user_id: &self.config.user_id,
            conversation_id,
            message_id,
            feedback,
            additional_feedback: "",
            timestamp_s,
        };
        self.post_ack(&url, &submission).await
    }

    // --- resources surface ---

    pub async fn list_orgs(&self) -> Result<Vec<String>, AgentApiError> {
        let url = url::orgs_url(&self.resources_base);
        let envelope: Envelope<Vec<OrgRecord>> = self.get_json(&url).await?;
        Ok(envelope.result.into_iter().map(|org| org.id).collect())
    }

    pub async fn create_org(&self, name: &str) -> Result<String, AgentApiError> {
        let url = url::orgs_url(&self.resources_base);
        let envelope: Envelope<CreatedOrg> =
            self.post_json(&url, &CreateOrgRequest { name }).await?;
        Ok(envelope.result.org_id)
    }

    pub async fn list_projects(&self, org_id: &str) -> Result<Vec<String>, AgentApiError> {
        let url = url::projects_url(&self.resources_base, org_id);
        let envelope: Envelope<Vec<ProjectRecord>> = self.get_json(&url).await?;
        Ok(envelope
            .result
            .into_iter()
            .map(|project| project.id)
            .collect())
    }

    pub async fn create_project(
        &self,
        org_id: &str,
        name: &str,
    ) -> Result<String, AgentApiError> {
        let url = url::projects_url(&self.resources_base, org_id);
        let envelope: Envelope<CreatedProject> = self
            .post_json(&url, &CreateProjectRequest { org_id, name })
            .await?;
        Ok(envelope.result.project_id)
    }

    /// Look up an existing agent under a project, if any.
    pub async fn find_agent(&self, project_id: &str) -> Result<Option<String>, AgentApiError> {
        let url = url::agents_url(&self.resources_base, project_id);
        let envelope: Envelope<Vec<AgentRecord>> = self.get_json(&url).await?;
        Ok(envelope.result.into_iter().next().map(|agent| agent.id))
    }

    pub async fn create_agent(&self, project_id: &str) -> Result<String, AgentApiError> {
        let url = url::agent_create_url(&self.resources_base, project_id);
        let envelope: Envelope<CreatedAgent> =
            self.post_json(&url, &serde_json::json!({})).await?;
        Ok(envelope.result.agent_id)
    }

    /// Fetch the raw agent status string (`Ready`, `Loading`, `NotReady`, …).
    pub async fn agent_status(&self, agent_id: &str) -> Result<String, AgentApiError> {
        let url = url::agent_status_url(&self.resources_base, agent_id);
        let wire: AgentStatusWire = self.get_json(&url).await?;
        Ok(wire.message)
    }

    pub async fn stop_agent(&self, agent_id: &str) -> Result<(), AgentApiError> {
        let url = url::agent_stop_url(&self.resources_base, agent_id);
        self.post_ack(&url, &serde_json::json!({})).await
    }

    pub async fn restart_agent(&self, agent_id: &str) -> Result<(), AgentApiError> {
        let url = url::agent_restart_url(&self.resources_base, agent_id);
        self.post_ack(&url, &serde_json::json!({})).await
    }

    // --- transport helpers ---

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AgentApiError> {
        let response = self.http.get(url).send().await.map_err(AgentApiError::from)?;
        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, AgentApiError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(AgentApiError::from)?;
        Self::decode(response).await
    }

    async fn post_ack<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<(), AgentApiError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(AgentApiError::from)?;
        Self::check(response).await.map(|_| ())
    }

    async fn delete(&self, url: &str) -> Result<(), AgentApiError> {
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(AgentApiError::from)?;
        Self::check(response).await.map(|_| ())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AgentApiError> {
        let response = Self::check(response).await?;
        response.json::<T>().await.map_err(AgentApiError::from)
    }

    async fn check(response: Response) -> Result<Response, AgentApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AgentApiError::Status(
            status,
            parse_error_message(status, &body),
        ))
    }
}

fn build_headers(config: &AgentApiConfig) -> Result<HeaderMap, AgentApiError> {
    let mut headers = HeaderMap::new();
    if let Some(user_agent) = config.user_agent.as_deref() {
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| AgentApiError::InvalidHeader(format!("User-Agent: {user_agent}")))?,
        );
    }
    for (key, value) in &config.extra_headers {
        headers.insert(
            HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| AgentApiError::InvalidHeader(key.clone()))?,
            HeaderValue::from_str(value)
                .map_err(|_| AgentApiError::InvalidHeader(format!("{key}: {value}")))?,
        );
    }
    Ok(headers)
}
