use async_trait::async_trait;

use agent_api::{
    AgentApiClient, AgentApiError, AgentScope, ConversationRecord, FeedbackKind, HistoryMessage,
    StreamSnapshot,
};

/// Transport seam the engine drives.
///
/// The production implementation is [`agent_api::AgentApiClient`]; tests
/// script a mock. Methods mirror the backend routes one-to-one so the
/// reconciler, edit coordinator, and lifecycle coordinator express their
/// protocols purely in terms of this trait.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    // chat surface
    async fn list_conversations(
        &self,
        scope: &AgentScope,
    ) -> Result<Vec<ConversationRecord>, AgentApiError>;

    async fn create_conversation(
        &self,
        scope: &AgentScope,
        summary: &str,
    ) -> Result<String, AgentApiError>;

    async fn conversation_history(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
    ) -> Result<Vec<HistoryMessage>, AgentApiError>;

    async fn delete_conversation(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
    ) -> Result<(), AgentApiError>;

    /// Submit a message; returns the id the stream endpoint is polled under.
    async fn send_message(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message: &str,
    ) -> Result<String, AgentApiError>;

    /// One poll of the generation stream.
    async fn stream_message(
        &self,
        scope: &AgentScope,
        message_id: &str,
    ) -> Result<StreamSnapshot, AgentApiError>;

    /// Delete a message and its entire tail from server-side history.
    async fn delete_from_message(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<(), AgentApiError>;

    async fn send_feedback(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message_id: &str,
        feedback: FeedbackKind,
        timestamp_s: i64,
    ) -> Result<(), AgentApiError>;

    // resources surface
    async fn list_orgs(&self) -> Result<Vec<String>, AgentApiError>;

    async fn create_org(&self, name: &str) -> Result<String, AgentApiError>;

    async fn list_projects(&self, org_id: &str) -> Result<Vec<String>, AgentApiError>;

    async fn create_project(&self, org_id: &str, name: &str) -> Result<String, AgentApiError>;

    async fn find_agent(&self, project_id: &str) -> Result<Option<String>, AgentApiError>;

    async fn create_agent(&self, project_id: &str) -> Result<String, AgentApiError>;

    async fn agent_status(&self, agent_id: &str) -> Result<String, AgentApiError>;

    async fn stop_agent(&self, agent_id: &str) -> Result<(), AgentApiError>;

    async fn restart_agent(&self, agent_id: &str) -> Result<(), AgentApiError>;
}

#[async_trait]
impl ChatBackend for AgentApiClient {
    async fn list_conversations(
        &self,
        scope: &AgentScope,
    ) -> Result<Vec<ConversationRecord>, AgentApiError> {
        AgentApiClient::list_conversations(self, scope).await
    }

    async fn create_conversation(
        &self,
        scope: &AgentScope,
        summary: &str,
    ) -> Result<String, AgentApiError> {
        AgentApiClient::create_conversation(self, scope, summary).await
    }

    async fn conversation_history(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
    ) -> Result<Vec<HistoryMessage>, AgentApiError> {
        AgentApiClient::conversation_history(self, scope, conversation_id).await
    }

    async fn delete_conversation(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
    ) -> Result<(), AgentApiError> {
        AgentApiClient::delete_conversation(self, scope, conversation_id).await
    }

    async fn send_message(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message: &str,
    ) -> Result<String, AgentApiError> {
        AgentApiClient::send_message(self, scope, conversation_id, message).await
    }

    async fn stream_message(
        &self,
        scope: &AgentScope,
        message_id: &str,
    ) -> Result<StreamSnapshot, AgentApiError> {
        AgentApiClient::stream_message(self, scope, message_id).await
    }

    async fn delete_from_message(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<(), AgentApiError> {
        AgentApiClient::delete_from_message(self, scope, conversation_id, message_id).await
    }

    async fn send_feedback(
        &self,
        scope: &AgentScope,
        conversation_id: &str,
        message_id: &str,
        feedback: FeedbackKind,
        timestamp_s: i64,
    ) -> Result<(), AgentApiError> {
        AgentApiClient::send_feedback(self, scope, conversation_id, message_id, feedback, timestamp_s)
            .await
    }

    async fn list_orgs(&self) -> Result<Vec<String>, AgentApiError> {
        AgentApiClient::list_orgs(self).await
    }

    async fn create_org(&self, name: &str) -> Result<String, AgentApiError> {
        AgentApiClient::create_org(self, name).await
    }

    async fn list_projects(&self, org_id: &str) -> Result<Vec<String>, AgentApiError> {
        AgentApiClient::list_projects(self, org_id).await
    }

    async fn create_project(&self, org_id: &str, name: &str) -> Result<String, AgentApiError> {
        AgentApiClient::create_project(self, org_id, name).await
    }

    async fn find_agent(&self, project_id: &str) -> Result<Option<String>, AgentApiError> {
        AgentApiClient::find_agent(self, project_id).await
    }

    async fn create_agent(&self, project_id: &str) -> Result<String, AgentApiError> {
        AgentApiClient::create_agent(self, project_id).await
    }

    async fn agent_status(&self, agent_id: &str) -> Result<String, AgentApiError> {
        AgentApiClient::agent_status(self, agent_id).await
    }

    async fn stop_agent(&self, agent_id: &str) -> Result<(), AgentApiError> {
        AgentApiClient::stop_agent(self, agent_id).await
    }

    async fn restart_agent(&self, agent_id: &str) -> Result<(), AgentApiError> {
        AgentApiClient::restart_agent(self, agent_id).await
    }
}
