use std::time::Duration;

use tracing::{debug, warn};

use agent_api::AgentScope;

use crate::backend::ChatBackend;
use crate::clock::Clock;
use crate::error::ChatError;
use crate::message::{Message, PLACEHOLDER_MESSAGE_ID};
use crate::reconciler::{is_cancelled, run_stream, CancelSignal};
use crate::status::AgentStatus;
use crate::store::ConversationStore;

/// Extra history fetches after the first when resolving a resent message id.
pub const RESOLVE_MAX_RETRIES: u32 = 2;

/// Delay between id-resolution history fetches.
pub const RESOLVE_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Edit a previously-sent user message and regenerate everything after it.
///
/// The target message and its entire tail are deleted on the server first,
/// then mirrored locally, so the log never shows the old tail alongside the
/// new answer. The edited text is appended under the placeholder id, resent,
/// and resolved to its server-assigned id by matching the refreshed history
/// on exact content before the regeneration stream is polled under that id.
pub(crate) async fn run_edit(
    backend: &dyn ChatBackend,
    clock: &dyn Clock,
    scope: &AgentScope,
    store: &mut ConversationStore,
    status: &mut AgentStatus,
    conversation_id: &str,
    message_id: &str,
    new_content: &str,
    cancel: Option<&CancelSignal>,
) -> Result<(), ChatError> {
    // An unresolved placeholder means a previous edit never learned its
    // server id; mutating server history again would orphan it for good.
    if store.placeholder_position().is_some() {
        return Err(ChatError::PlaceholderInFlight);
    }

    let Some(index) = store.position(message_id) else {
        return Err(ChatError::MessageNotFound {
            id: message_id.to_string(),
        });
    };

    backend
        .delete_from_message(scope, conversation_id, message_id)
        .await?;
    store.truncate_from(index);
    debug!(message_id, dropped_from = index, "deleted edited tail");

    store.push(Message::user(
        PLACEHOLDER_MESSAGE_ID,
        new_content,
        conversation_id,
        clock.now_ms(),
    ))?;

    // The send route does return an id, but the id the history (and the
    // stream endpoint) knows the resent message under is established by
    // re-fetching history, so the returned one is not trusted here.
    backend
        .send_message(scope, conversation_id, new_content)
        .await?;

    let resolved_id =
        resolve_resent_id(backend, clock, scope, conversation_id, new_content, cancel).await?;
    store.resolve_placeholder(&resolved_id, clock.now_ms());
    debug!(resolved_id, "resent message id resolved");

    run_stream(
        backend,
        clock,
        scope,
        store,
        status,
        &resolved_id,
        conversation_id,
        cancel,
    )
    .await
}

/// Find the server id of the just-resent message by exact content match
/// against refreshed history, first match wins. Up to
/// `RESOLVE_MAX_RETRIES` additional fetches are made, spaced by
/// `RESOLVE_RETRY_DELAY`, before giving up.
async fn resolve_resent_id(
    backend: &dyn ChatBackend,
    clock: &dyn Clock,
    scope: &AgentScope,
    conversation_id: &str,
    content: &str,
    cancel: Option<&CancelSignal>,
) -> Result<String, ChatError> {
    let attempts = RESOLVE_MAX_RETRIES + 1;
    for attempt in 0..attempts {
        if attempt > 0 {
            clock.sleep(RESOLVE_RETRY_DELAY).await;
        }
        if is_cancelled(cancel) {
            return Err(ChatError::Cancelled);
        }

        let history = backend.conversation_history(scope, conversation_id).await?;
        if let Some(record) = history.iter().find(|record| record.content == content) {
            return Ok(record.message_id.clone());
        }
        debug!(attempt, "resent message not yet visible in history");
    }

    warn!(attempts, "giving up on resent message id resolution");
    Err(ChatError::MessageResolutionFailed { attempts })
}
