use std::time::Duration;

use tracing::{debug, info};

use crate::backend::ChatBackend;
use crate::clock::Clock;
use crate::error::ChatError;
use crate::status::AgentStatus;

/// History lookups made before concluding a project has no agent.
pub const AGENT_LOOKUP_ATTEMPTS: u32 = 3;

/// Delay between agent lookups.
pub const AGENT_LOOKUP_DELAY: Duration = Duration::from_secs(2);

/// Interval between agent status polls while waiting for it to settle.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub const DEFAULT_ORG_NAME: &str = "Default Organization";
pub const DEFAULT_PROJECT_NAME: &str = "Default Project";

/// Resolve the project the chat session is scoped to.
///
/// A fresh account has neither org nor project; both are provisioned with
/// default names. An existing account always uses its first org and that
/// org's first project.
pub(crate) async fn resolve_project(backend: &dyn ChatBackend) -> Result<String, ChatError> {
    let orgs = backend.list_orgs().await?;
    let org_id = match orgs.into_iter().next() {
        Some(id) => id,
        None => {
            info!("no org found, provisioning defaults");
            backend.create_org(DEFAULT_ORG_NAME).await?
        }
    };

    let projects = backend.list_projects(&org_id).await?;
    match projects.into_iter().next() {
        Some(id) => Ok(id),
        None => {
            info!(org_id, "no project found, provisioning default");
            Ok(backend.create_project(&org_id, DEFAULT_PROJECT_NAME).await?)
        }
    }
}

/// Resolve the project's agent, creating one only after repeated lookups
/// come back empty.
///
/// Agent registration can lag project creation, so the lookup is retried
/// before concluding the agent does not exist; creation happens at most
/// once per call.
pub(crate) async fn resolve_agent(
    backend: &dyn ChatBackend,
    clock: &dyn Clock,
    project_id: &str,
) -> Result<String, ChatError> {
    for attempt in 0..AGENT_LOOKUP_ATTEMPTS {
        if attempt > 0 {
            clock.sleep(AGENT_LOOKUP_DELAY).await;
        }
        if let Some(agent_id) = backend.find_agent(project_id).await? {
            debug!(agent_id, attempt, "agent found");
            return Ok(agent_id);
        }
    }

    info!(project_id, "no agent after lookups, creating one");
    Ok(backend.create_agent(project_id).await?)
}

/// One status poll, mapped into the coarse lifecycle state.
pub(crate) async fn refresh_status(
    backend: &dyn ChatBackend,
    agent_id: &str,
) -> Result<AgentStatus, ChatError> {
    let raw = backend.agent_status(agent_id).await?;
    Ok(AgentStatus::from_raw(&raw))
}
