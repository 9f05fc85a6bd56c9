/// Canonical agent status shared by the lifecycle coordinator and the
/// stream reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentStatus {
    #[default]
    Starting,
    Running,
    Ready,
    Error,
}

impl AgentStatus {
    /// Map a raw backend status string onto the canonical set.
    ///
    /// The resources surface reports provisioning-phase states (`NotReady`,
    /// `Loading`) that all present as "still starting" to callers; anything
    /// unrecognized is treated as an error rather than guessed at.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Ready" => Self::Ready,
            "Running" => Self::Running,
            "Starting" | "Loading" | "NotReady" => Self::Starting,
            _ => Self::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "Starting",
            Self::Running => "Running",
            Self::Ready => "Ready",
            Self::Error => "Error",
        }
    }

    /// True once the agent has reached a state that no longer warrants
    /// startup polling.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Ready | Self::Error)
    }
}

/// Resolved backend identity for the session.
///
/// Unset at boot, resolved once by the lifecycle coordinator, and reset only
/// on explicit stop/restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentIdentity {
    pub project_id: Option<String>,
    pub agent_id: Option<String>,
    pub status: AgentStatus,
}

impl AgentIdentity {
    pub fn is_resolved(&self) -> bool {
        self.project_id.is_some() && self.agent_id.is_some()
    }
}
