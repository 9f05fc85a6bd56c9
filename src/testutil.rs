//! Scripted [`ChatBackend`] double for engine tests.
//!
//! Each route pops from its own response queue; an empty queue yields a
//! benign default so tests only script the calls they care about. Mutating
//! routes record their arguments for later assertions.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use agent_api::{
    AgentApiError, AgentScope, ConversationRecord, FeedbackKind, HistoryMessage, StatusCode,
    StreamSnapshot,
};

use crate::backend::ChatBackend;

#[derive(Default)]
pub(crate) struct MockBackend {
    conversations: Mutex<Vec<ConversationRecord>>,
    created_conversation_ids: Mutex<VecDeque<String>>,
    created_summaries: Mutex<Vec<String>>,
    deleted_conversations: Mutex<Vec<String>>,

    histories: Mutex<VecDeque<Vec<HistoryMessage>>>,
    history_fetches: AtomicUsize,

    send_ids: Mutex<VecDeque<String>>,
    sent_messages: Mutex<Vec<(String, String)>>,

    stream_responses: Mutex<VecDeque<StreamSnapshot>>,
    stream_failures: Mutex<VecDeque<String>>,
    stream_poll_count: AtomicUsize,

    deleted_from: Mutex<Vec<(String, String)>>,
    feedback: Mutex<Vec<(String, FeedbackKind, i64)>>,

    orgs: Mutex<Vec<String>>,
    projects: Mutex<Vec<String>>,
    created_org_names: Mutex<Vec<String>>,
    created_project_names: Mutex<Vec<(String, String)>>,

    find_agent_results: Mutex<VecDeque<Option<String>>>,
    find_agent_calls: AtomicUsize,
    create_agent_calls: AtomicUsize,

    statuses: Mutex<VecDeque<String>>,
    stopped_agents: Mutex<Vec<String>>,
    restarted_agents: Mutex<Vec<String>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // --- scripting ---

    pub(crate) fn set_conversations(&self, records: Vec<ConversationRecord>) {
        *self.conversations.lock().unwrap() = records;
    }

    pub(crate) fn push_created_conversation_id(&self, id: &str) {
        self.created_conversation_ids
            .lock()
            .unwrap()
            .push_back(id.to_string());
    }

    pub(crate) fn push_history(&self, history: Vec<HistoryMessage>) {
        self.histories.lock().unwrap().push_back(history);
    }

    pub(crate) fn push_send_id(&self, id: &str) {
        self.send_ids.lock().unwrap().push_back(id.to_string());
    }

    pub(crate) fn push_stream(&self, snapshot: StreamSnapshot) {
        self.stream_responses.lock().unwrap().push_back(snapshot);
    }

    pub(crate) fn fail_next_stream(&self, message: &str) {
        self.stream_failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
    }

    pub(crate) fn set_orgs(&self, orgs: Vec<String>) {
        *self.orgs.lock().unwrap() = orgs;
    }

    pub(crate) fn set_projects(&self, projects: Vec<String>) {
        *self.projects.lock().unwrap() = projects;
    }

    pub(crate) fn push_find_agent(&self, result: Option<&str>) {
        self.find_agent_results
            .lock()
            .unwrap()
            .push_back(result.map(str::to_string));
    }

    pub(crate) fn push_status(&self, status: &str) {
        self.statuses.lock().unwrap().push_back(status.to_string());
    }

    // --- observations ---

    pub(crate) fn stream_polls(&self) -> usize {
        self.stream_poll_count.load(Ordering::SeqCst)
    }

    pub(crate) fn history_fetches(&self) -> usize {
        self.history_fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent_messages.lock().unwrap().clone()
    }

    pub(crate) fn deleted_from(&self) -> Vec<(String, String)> {
        self.deleted_from.lock().unwrap().clone()
    }

    pub(crate) fn deleted_conversations(&self) -> Vec<String> {
        self.deleted_conversations.lock().unwrap().clone()
    }

    pub(crate) fn created_summaries(&self) -> Vec<String> {
        self.created_summaries.lock().unwrap().clone()
    }

    pub(crate) fn feedback_sent(&self) -> Vec<(String, FeedbackKind, i64)> {
        self.feedback.lock().unwrap().clone()
    }

    pub(crate) fn created_org_names(&self) -> Vec<String> {
        self.created_org_names.lock().unwrap().clone()
    }

    pub(crate) fn created_project_names(&self) -> Vec<(String, String)> {
        self.created_project_names.lock().unwrap().clone()
    }

    pub(crate) fn find_agent_calls(&self) -> usize {
        self.find_agent_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn create_agent_calls(&self) -> usize {
        self.create_agent_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn stopped_agents(&self) -> Vec<String> {
        self.stopped_agents.lock().unwrap().clone()
    }

    pub(crate) fn restarted_agents(&self) -> Vec<String> {
        self.restarted_agents.lock().unwrap().clone()
    }
}

fn unavailable(message: &str) -> AgentApiError {
    AgentApiError::Status(StatusCode::SERVICE_UNAVAILABLE, message.to_string())
}

#[async_trait]
impl ChatBackend for MockBackend {
    async fn list_conversations(
        &self,
        _scope: &AgentScope,
    ) -> Result<Vec<ConversationRecord>, AgentApiError> {
        Ok(self.conversations.lock().unwrap().clone())
    }

    async fn create_conversation(
        &self,
        _scope: &AgentScope,
        summary: &str,
    ) -> Result<String, AgentApiError> {
        self.created_summaries
            .lock()
            .unwrap()
            .push(summary.to_string());
        Ok(self
            .created_conversation_ids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "conv-new".to_string()))
    }

    async fn conversation_history(
        &self,
        _scope: &AgentScope,
        _conversation_id: &str,
    ) -> Result<Vec<HistoryMessage>, AgentApiError> {
        self.history_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .histories
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn delete_conversation(
        &self,
        _scope: &AgentScope,
        conversation_id: &str,
    ) -> Result<(), AgentApiError> {
        self.deleted_conversations
            .lock()
            .unwrap()
            .push(conversation_id.to_string());
        Ok(())
    }

    async fn send_message(
        &self,
        _scope: &AgentScope,
        conversation_id: &str,
        message: &str,
    ) -> Result<String, AgentApiError> {
        self.sent_messages
            .lock()
            .unwrap()
            .push((conversation_id.to_string(), message.to_string()));
        Ok(self
            .send_ids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "srv-generated".to_string()))
    }

    async fn stream_message(
        &self,
        _scope: &AgentScope,
        _message_id: &str,
    ) -> Result<StreamSnapshot, AgentApiError> {
        if let Some(message) = self.stream_failures.lock().unwrap().pop_front() {
            return Err(unavailable(&message));
        }
        self.stream_poll_count.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .stream_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(StreamSnapshot {
                completed: true,
                generated: None,
                references: Vec::new(),
            }))
    }

    async fn delete_from_message(
        &self,
        _scope: &AgentScope,
        conversation_id: &str,
        message_id: &str,
    ) -> Result<(), AgentApiError> {
        self.deleted_from
            .lock()
            .unwrap()
            .push((conversation_id.to_string(), message_id.to_string()));
        Ok(())
    }

    async fn send_feedback(
        &self,
        _scope: &AgentScope,
        _conversation_id: &str,
        message_id: &str,
        feedback: FeedbackKind,
        timestamp_s: i64,
    ) -> Result<(), AgentApiError> {
        self.feedback
            .lock()
            .unwrap()
            .push((message_id.to_string(), feedback, timestamp_s));
        Ok(())
    }

    async fn list_orgs(&self) -> Result<Vec<String>, AgentApiError> {
        Ok(self.orgs.lock().unwrap().clone())
    }

    async fn create_org(&self, name: &str) -> Result<String, AgentApiError> {
        self.created_org_names
            .lock()
            .unwrap()
            .push(name.to_string());
        Ok("org-new".to_string())
    }

    async fn list_projects(&self, _org_id: &str) -> Result<Vec<String>, AgentApiError> {
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn create_project(&self, org_id: &str, name: &str) -> Result<String, AgentApiError> {
        self.created_project_names
            .lock()
            .unwrap()
            .push((org_id.to_string(), name.to_string()));
        Ok("proj-new".to_string())
    }

    async fn find_agent(&self, _project_id: &str) -> Result<Option<String>, AgentApiError> {
        self.find_agent_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .find_agent_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(None))
    }

    async fn create_agent(&self, _project_id: &str) -> Result<String, AgentApiError> {
        self.create_agent_calls.fetch_add(1, Ordering::SeqCst);
        Ok("agent-new".to_string())
    }

    async fn agent_status(&self, _agent_id: &str) -> Result<String, AgentApiError> {
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "Ready".to_string()))
    }

    async fn stop_agent(&self, agent_id: &str) -> Result<(), AgentApiError> {
        self.stopped_agents
            .lock()
            .unwrap()
            .push(agent_id.to_string());
        Ok(())
    }

    async fn restart_agent(&self, agent_id: &str) -> Result<(), AgentApiError> {
        self.restarted_agents
            .lock()
            .unwrap()
            .push(agent_id.to_string());
        Ok(())
    }
}
