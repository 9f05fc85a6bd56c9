//! Transport-only HTTP client primitives for the agent chat backend.
//!
//! This crate owns endpoint URL construction, wire payload shapes, and the
//! transport error taxonomy for two backend surfaces:
//!
//! - the **chat surface** (conversations, history, send, stream polling,
//!   tail deletion, feedback), and
//! - the **resources surface** (organization/project/agent provisioning and
//!   agent status/stop/restart).
//!
//! It intentionally contains no reconciliation or lifecycle logic and no
//! retry loops: the stream endpoint is a plain poll-once JSON route, and all
//! polling cadence belongs to the engine that drives this client.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod url;

pub use reqwest::StatusCode;

pub use client::AgentApiClient;
pub use config::AgentApiConfig;
pub use error::AgentApiError;
pub use payload::{
    AgentScope, ConversationRecord, FeedbackKind, HistoryMessage, StreamSnapshot,
};
pub use url::{normalize_base_url, HISTORY_FETCH_LIMIT};
