use std::sync::Arc;

use tracing::{debug, info};

use agent_api::{AgentScope, FeedbackKind};

use crate::backend::ChatBackend;
use crate::clock::Clock;
use crate::edit::run_edit;
use crate::error::ChatError;
use crate::lifecycle::{refresh_status, resolve_agent, resolve_project, STATUS_POLL_INTERVAL};
use crate::message::{Conversation, Message};
use crate::reconciler::{is_cancelled, run_stream, CancelSignal};
use crate::status::{AgentIdentity, AgentStatus};
use crate::store::ConversationStore;

/// Summary given to conversations created on the user's behalf.
pub const NEW_CONVERSATION_SUMMARY: &str = "New Task";

/// Owning coordinator for one chat session.
///
/// The engine holds the conversation store and agent identity exclusively;
/// every generation, edit, and status poll runs through `&mut self`, so at
/// most one of them is in flight at a time and no cross-task flags are
/// needed. Callers observe state through the `&self` accessors between
/// operations.
pub struct ChatEngine {
    backend: Arc<dyn ChatBackend>,
    clock: Arc<dyn Clock>,
    store: ConversationStore,
    identity: AgentIdentity,
}

impl ChatEngine {
    pub fn new(backend: Arc<dyn ChatBackend>, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            store: ConversationStore::new(),
            identity: AgentIdentity::default(),
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    pub fn status(&self) -> AgentStatus {
        self.identity.status
    }

    fn scope(&self) -> Result<AgentScope, ChatError> {
        match (&self.identity.project_id, &self.identity.agent_id) {
            (Some(project_id), Some(agent_id)) => Ok(AgentScope::new(project_id, agent_id)),
            _ => Err(ChatError::MissingIdentity),
        }
    }

    fn current_conversation(&self) -> Result<String, ChatError> {
        self.store
            .current_conversation_id()
            .map(str::to_string)
            .ok_or(ChatError::MissingConversation)
    }

    /// Resolve the backend identity and load the conversation list, creating
    /// default org/project/agent/conversation records as needed.
    pub async fn initialize(&mut self) -> Result<(), ChatError> {
        let backend = Arc::clone(&self.backend);
        let clock = Arc::clone(&self.clock);

        let project_id = resolve_project(backend.as_ref()).await?;
        let agent_id = resolve_agent(backend.as_ref(), clock.as_ref(), &project_id).await?;
        info!(project_id, agent_id, "backend identity resolved");

        self.identity.project_id = Some(project_id);
        self.identity.agent_id = Some(agent_id.clone());
        self.identity.status = refresh_status(backend.as_ref(), &agent_id).await?;

        self.fetch_conversations().await
    }

    /// Refresh the conversation list. With no server-side conversations a
    /// fresh one is created; otherwise the first listed conversation becomes
    /// current unless the current one is still present.
    pub async fn fetch_conversations(&mut self) -> Result<(), ChatError> {
        let scope = self.scope()?;
        let records = self.backend.list_conversations(&scope).await?;

        if records.is_empty() {
            debug!("no conversations on server, creating one");
            let id = self
                .backend
                .create_conversation(&scope, NEW_CONVERSATION_SUMMARY)
                .await?;
            self.store.set_conversations(vec![Conversation {
                id: id.clone(),
                summary: NEW_CONVERSATION_SUMMARY.to_string(),
                timestamp_ms: self.clock.now_ms(),
            }]);
            self.store.set_current_conversation(Some(id));
            self.store.set_messages(Vec::new());
            return Ok(());
        }

        let conversations: Vec<Conversation> = records
            .into_iter()
            .map(|record| Conversation {
                id: record.id,
                summary: record.summary,
                timestamp_ms: record.created_at_ms,
            })
            .collect();

        let keep_current = self
            .store
            .current_conversation_id()
            .is_some_and(|current| conversations.iter().any(|c| c.id == current));
        let selected = if keep_current {
            self.current_conversation()?
        } else {
            conversations[0].id.clone()
        };

        self.store.set_conversations(conversations);
        self.open_conversation(&selected).await
    }

    /// Select a conversation and load its history.
    pub async fn open_conversation(&mut self, conversation_id: &str) -> Result<(), ChatError> {
        let scope = self.scope()?;
        self.store
            .set_current_conversation(Some(conversation_id.to_string()));

        let history = self
            .backend
            .conversation_history(&scope, conversation_id)
            .await?;
        let messages = history
            .into_iter()
            .map(|record| Message::from_history(record, conversation_id))
            .collect();
        self.store.set_messages(messages);
        debug!(conversation_id, "conversation opened");
        Ok(())
    }

    /// Create a conversation and make it current.
    pub async fn create_conversation(&mut self, summary: &str) -> Result<String, ChatError> {
        let scope = self.scope()?;
        let id = self.backend.create_conversation(&scope, summary).await?;

        let mut conversations = self.store.conversations().to_vec();
        conversations.insert(
            0,
            Conversation {
                id: id.clone(),
                summary: summary.to_string(),
                timestamp_ms: self.clock.now_ms(),
            },
        );
        self.store.set_conversations(conversations);
        self.store.set_current_conversation(Some(id.clone()));
        self.store.set_messages(Vec::new());
        Ok(id)
    }

    /// Delete a conversation. Deleting the current one falls back to the
    /// first remaining conversation, or to a fresh one when none remain.
    pub async fn delete_conversation(&mut self, conversation_id: &str) -> Result<(), ChatError> {
        let scope = self.scope()?;
        self.backend
            .delete_conversation(&scope, conversation_id)
            .await?;

        let remaining: Vec<Conversation> = self
            .store
            .conversations()
            .iter()
            .filter(|c| c.id != conversation_id)
            .cloned()
            .collect();
        let was_current = self.store.current_conversation_id() == Some(conversation_id);
        self.store.set_conversations(remaining);

        if !was_current {
            return Ok(());
        }

        match self.store.conversations().first().map(|c| c.id.clone()) {
            Some(next) => self.open_conversation(&next).await,
            None => {
                self.store.set_current_conversation(None);
                self.create_conversation(NEW_CONVERSATION_SUMMARY)
                    .await
                    .map(|_| ())
            }
        }
    }

    /// Send a user message and drive its generation to completion.
    pub async fn send_message(
        &mut self,
        content: &str,
        cancel: Option<&CancelSignal>,
    ) -> Result<(), ChatError> {
        let scope = self.scope()?;
        let conversation_id = self.current_conversation()?;

        let now_ms = self.clock.now_ms();
        self.store.push(Message::user(
            now_ms.to_string(),
            content,
            &conversation_id,
            now_ms,
        ))?;

        let backend = Arc::clone(&self.backend);
        let clock = Arc::clone(&self.clock);
        let stream_id = backend
            .send_message(&scope, &conversation_id, content)
            .await?;

        run_stream(
            backend.as_ref(),
            clock.as_ref(),
            &scope,
            &mut self.store,
            &mut self.identity.status,
            &stream_id,
            &conversation_id,
            cancel,
        )
        .await
    }

    /// Edit a previously-sent message and regenerate everything after it.
    pub async fn edit_message(
        &mut self,
        message_id: &str,
        new_content: &str,
        cancel: Option<&CancelSignal>,
    ) -> Result<(), ChatError> {
        let scope = self.scope()?;
        let conversation_id = self.current_conversation()?;

        let backend = Arc::clone(&self.backend);
        let clock = Arc::clone(&self.clock);
        run_edit(
            backend.as_ref(),
            clock.as_ref(),
            &scope,
            &mut self.store,
            &mut self.identity.status,
            &conversation_id,
            message_id,
            new_content,
            cancel,
        )
        .await
    }

    /// Record a feedback verdict against a generated message.
    pub async fn send_feedback(
        &mut self,
        message_id: &str,
        feedback: FeedbackKind,
    ) -> Result<(), ChatError> {
        let scope = self.scope()?;
        let conversation_id = self.current_conversation()?;

        if self.store.bot_position(message_id).is_none() {
            return Err(ChatError::MessageNotFound {
                id: message_id.to_string(),
            });
        }

        // The feedback route takes second resolution.
        let timestamp_s = self.clock.now_ms() / 1_000;
        self.backend
            .send_feedback(&scope, &conversation_id, message_id, feedback, timestamp_s)
            .await?;
        self.store.set_feedback(message_id, feedback);
        Ok(())
    }

    /// One status poll against the resources surface.
    pub async fn refresh_status(&mut self) -> Result<AgentStatus, ChatError> {
        let agent_id = self
            .identity
            .agent_id
            .clone()
            .ok_or(ChatError::MissingIdentity)?;
        let status = refresh_status(self.backend.as_ref(), &agent_id).await?;
        self.identity.status = status;
        Ok(status)
    }

    /// Poll agent status until it settles (Ready or Error).
    pub async fn wait_until_settled(
        &mut self,
        cancel: Option<&CancelSignal>,
    ) -> Result<AgentStatus, ChatError> {
        loop {
            if is_cancelled(cancel) {
                return Err(ChatError::Cancelled);
            }
            let status = self.refresh_status().await?;
            if status.is_settled() {
                return Ok(status);
            }
            self.clock.sleep(STATUS_POLL_INTERVAL).await;
        }
    }

    pub async fn stop_agent(&mut self) -> Result<(), ChatError> {
        let agent_id = self
            .identity
            .agent_id
            .clone()
            .ok_or(ChatError::MissingIdentity)?;
        self.backend.stop_agent(&agent_id).await?;
        self.identity.status = AgentStatus::Ready;
        info!(agent_id, "agent stopped");
        Ok(())
    }

    pub async fn restart_agent(&mut self) -> Result<(), ChatError> {
        let agent_id = self
            .identity
            .agent_id
            .clone()
            .ok_or(ChatError::MissingIdentity)?;
        self.backend.restart_agent(&agent_id).await?;
        self.identity.status = AgentStatus::Starting;
        info!(agent_id, "agent restarting");
        Ok(())
    }
}
