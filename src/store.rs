use serde_json::Value;

use crate::error::ChatError;
use crate::message::{Conversation, Feedback, Message};

/// Owned state for the active conversation: the ordered message log plus
/// conversation metadata.
///
/// The store is a plain value with no global registration; callers inject it
/// where it is needed and tests instantiate isolated instances. Only the
/// stream reconciler and the edit coordinator write to the log; presentation
/// layers observe through the `&self` accessors.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    current_conversation_id: Option<String>,
    messages: Vec<Message>,
    messages_loaded: bool,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- read side ---

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn current_conversation_id(&self) -> Option<&str> {
        self.current_conversation_id.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True once a history fetch has populated the log for the current
    /// conversation.
    pub fn messages_loaded(&self) -> bool {
        self.messages_loaded
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.messages.iter().position(|message| message.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn content_of(&self, id: &str) -> Option<&str> {
        self.position(id)
            .map(|index| self.messages[index].content.as_str())
    }

    /// Position of the bot message with this id, ignoring user entries.
    ///
    /// A regenerated reply is polled under the resent user message's server
    /// id, so both the user entry and the streamed bot entry can end up
    /// carrying the same id. Stream and feedback mutations always target the
    /// bot entry.
    pub fn bot_position(&self, id: &str) -> Option<usize> {
        self.messages
            .iter()
            .position(|message| message.is_bot && message.id == id)
    }

    pub fn placeholder_position(&self) -> Option<usize> {
        self.messages.iter().position(Message::is_placeholder)
    }

    // --- conversation metadata ---

    pub fn set_conversations(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
    }

    pub fn set_current_conversation(&mut self, id: Option<String>) {
        if self.current_conversation_id != id {
            self.messages.clear();
            self.messages_loaded = false;
        }
        self.current_conversation_id = id;
    }

    // --- log mutation primitives ---

    /// Replace the whole log, e.g. after a history fetch.
    pub fn set_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.messages_loaded = true;
    }

    /// Append a message to the log.
    ///
    /// Enforces the placeholder invariant: at most one message may carry the
    /// placeholder id at any time.
    pub fn push(&mut self, message: Message) -> Result<(), ChatError> {
        if message.is_placeholder() && self.placeholder_position().is_some() {
            return Err(ChatError::PlaceholderInFlight);
        }
        self.messages.push(message);
        Ok(())
    }

    /// Overwrite a partial bot message's content in place, refreshing its
    /// timestamp. Returns false when no bot entry has this id or the content
    /// is unchanged (no mutation, no re-timestamp).
    pub fn overwrite_partial(&mut self, id: &str, content: &str, now_ms: i64) -> bool {
        let Some(index) = self.bot_position(id) else {
            return false;
        };
        let message = &mut self.messages[index];
        if message.content == content {
            return false;
        }
        message.content = content.to_string();
        message.timestamp_ms = now_ms;
        true
    }

    /// Terminal mutation for a stream run: set final content and references
    /// on the bot entry and clear its partial flag. Returns false when no bot
    /// entry has this id.
    pub fn finalize(
        &mut self,
        id: &str,
        content: &str,
        references: Vec<Value>,
        now_ms: i64,
    ) -> bool {
        let Some(index) = self.bot_position(id) else {
            return false;
        };
        let message = &mut self.messages[index];
        message.content = content.to_string();
        message.references = references;
        message.is_partial = false;
        message.timestamp_ms = now_ms;
        true
    }

    /// Drop the message at `index` and everything after it.
    pub fn truncate_from(&mut self, index: usize) {
        self.messages.truncate(index);
    }

    /// Adopt a server-issued id for the in-flight placeholder entry.
    pub fn resolve_placeholder(&mut self, real_id: &str, now_ms: i64) -> bool {
        let Some(index) = self.placeholder_position() else {
            return false;
        };
        let message = &mut self.messages[index];
        message.id = real_id.to_string();
        message.timestamp_ms = now_ms;
        true
    }

    /// Record a feedback verdict on the bot message with this id.
    pub fn set_feedback(&mut self, id: &str, feedback: Feedback) -> bool {
        let Some(index) = self.bot_position(id) else {
            return false;
        };
        self.messages[index].feedback = Some(feedback);
        true
    }
}
