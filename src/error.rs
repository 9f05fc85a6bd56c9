use agent_api::AgentApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("project/agent identity is not resolved; initialize the engine first")]
    MissingIdentity,

    #[error("no active conversation is selected")]
    MissingConversation,

    #[error("message '{id}' not found in the active conversation")]
    MessageNotFound { id: String },

    #[error("no server id matched the resent message content after {attempts} history fetches")]
    MessageResolutionFailed { attempts: u32 },

    #[error("an edited message is already awaiting id resolution")]
    PlaceholderInFlight,

    #[error("stream run was cancelled")]
    Cancelled,

    #[error("backend request failed: {0}")]
    Api(#[from] AgentApiError),
}
