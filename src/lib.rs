//! Client-side conversation engine for a polling AI-agent backend.
//!
//! The backend exposes no push channel: generation progress is observed by
//! polling a stream endpoint and reconciling each snapshot into an ordered
//! message log. This crate owns that reconciliation, the edit-and-regenerate
//! protocol (server-side tail deletion plus placeholder id resolution), and
//! agent lifecycle provisioning, on top of the transport primitives in
//! [`agent_api`] and the response parsing in [`agent_response`].
//!
//! # Overview
//! - [`ChatEngine`] is the single owning coordinator: generations, edits,
//!   and status polls all run through `&mut self`, so they cannot interleave.
//! - [`ConversationStore`] holds the conversation list and message log as a
//!   plain injected value.
//! - [`Clock`] abstracts time and poll cadence; [`ManualClock`] makes retry
//!   and polling paths deterministic under test.
//! - [`ChatBackend`] is the transport seam; [`agent_api::AgentApiClient`]
//!   implements it for production use.
//! - Long-running operations accept an optional [`CancelSignal`] checked at
//!   every poll boundary.

pub mod backend;
pub mod clock;
pub mod edit;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod message;
pub mod reconciler;
pub mod status;
pub mod store;

#[cfg(test)]
mod testutil;

pub use backend::ChatBackend;
pub use clock::{Clock, ManualClock, SystemClock};
pub use edit::{RESOLVE_MAX_RETRIES, RESOLVE_RETRY_DELAY};
pub use engine::{ChatEngine, NEW_CONVERSATION_SUMMARY};
pub use error::ChatError;
pub use lifecycle::{
    AGENT_LOOKUP_ATTEMPTS, AGENT_LOOKUP_DELAY, DEFAULT_ORG_NAME, DEFAULT_PROJECT_NAME,
    STATUS_POLL_INTERVAL,
};
pub use message::{Conversation, Feedback, Message, PLACEHOLDER_MESSAGE_ID};
pub use reconciler::{CancelSignal, STREAM_POLL_INTERVAL};
pub use status::{AgentIdentity, AgentStatus};
pub use store::ConversationStore;

pub use agent_api::{
    AgentApiClient, AgentApiConfig, AgentApiError, AgentScope, ConversationRecord, HistoryMessage,
    StreamSnapshot,
};
pub use agent_response::{parse as parse_agent_response, ContentBlock, ToolInvocation, ToolOutcome};
