use crate::payload::AgentScope;

/// Default base URL for the chat surface.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.energent.ai";
/// Default base URL for the resources (provisioning) surface.
pub const DEFAULT_RESOURCES_BASE_URL: &str = "https://resources.epsilla.com/api";

/// Fixed limit segment for history fetches.
///
/// The history route rejects requests without an explicit limit with
/// 405 Method Not Allowed, so every fetch carries this value.
pub const HISTORY_FETCH_LIMIT: u32 = 65536;

/// Normalize a configured base URL: trim whitespace and trailing slashes,
/// falling back to `default` when the input is empty.
pub fn normalize_base_url(input: &str, default: &str) -> String {
    let base = if input.trim().is_empty() {
        default
    } else {
        input.trim()
    };
    base.trim_end_matches('/').to_string()
}

pub fn conversations_url(base: &str, scope: &AgentScope) -> String {
    format!(
        "{base}/conversations/{}/{}",
        scope.project_id, scope.agent_id
    )
}

pub fn conversation_create_url(base: &str, scope: &AgentScope) -> String {
    format!(
        "{base}/conversation/{}/{}/create",
        scope.project_id, scope.agent_id
    )
}

pub fn conversation_history_url(base: &str, scope: &AgentScope, conversation_id: &str) -> String {
    format!(
        "{base}/conversation/{}/{}/{conversation_id}/{HISTORY_FETCH_LIMIT}",
        scope.project_id, scope.agent_id
    )
}

pub fn conversation_delete_url(base: &str, scope: &AgentScope, conversation_id: &str) -> String {
    format!(
        "{base}/conversation/{}/{}/{conversation_id}",
        scope.project_id, scope.agent_id
    )
}

pub fn chat_url(base: &str, scope: &AgentScope, conversation_id: &str) -> String {
    format!(
        "{base}/chat/{}/{}/{conversation_id}",
        scope.project_id, scope.agent_id
    )
}

pub fn chat_delete_url(
    base: &str,
    scope: &AgentScope,
    conversation_id: &str,
    message_id: &str,
) -> String {
    format!(
        "{base}/chat/{}/{}/{conversation_id}/{message_id}",
        scope.project_id, scope.agent_id
    )
}

pub fn stream_url(base: &str, scope: &AgentScope, message_id: &str) -> String {
    format!(
        "{base}/stream/{}/{}/{message_id}",
        scope.project_id, scope.agent_id
    )
}

pub fn feedback_url(base: &str, scope: &AgentScope, conversation_id: &str) -> String {
    format!(
        "{base}/feedback/generation/{}/{}/{conversation_id}",
        scope.project_id, scope.agent_id
    )
}

pub fn orgs_url(base: &str) -> String {
    format!("{base}/orgs")
}

pub fn projects_url(base: &str, org_id: &str) -> String {
    format!("{base}/projects/{org_id}")
}

pub fn agents_url(base: &str, project_id: &str) -> String {
    format!("{base}/agents/{project_id}")
}

pub fn agent_create_url(base: &str, project_id: &str) -> String {
    format!("{base}/agent/{project_id}")
}

pub fn agent_status_url(base: &str, agent_id: &str) -> String {
    format!("{base}/agent/{agent_id}/status")
}

pub fn agent_stop_url(base: &str, agent_id: &str) -> String {
    format!("{base}/agent/{agent_id}/stop")
}

pub fn agent_restart_url(base: &str, agent_id: &str) -> String {
    format!("{base}/agent/{agent_id}/restart")
}
