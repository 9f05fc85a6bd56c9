use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use agent_api::{AgentScope, StreamSnapshot};

use crate::backend::ChatBackend;
use crate::clock::Clock;
use crate::error::ChatError;
use crate::message::Message;
use crate::status::AgentStatus;
use crate::store::ConversationStore;

/// Fixed interval between stream polls.
pub const STREAM_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shared cancellation flag checked at every poll boundary.
pub type CancelSignal = Arc<AtomicBool>;

/// Outcome of folding one poll response into the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PollStep {
    Continue,
    Done,
}

/// Drive one generation to completion: poll the stream endpoint for
/// `message_id`, reconciling every response into the log, until the server
/// reports completion or `cancel` is raised.
///
/// The agent status flips to `Running` on entry and back to `Ready` on every
/// terminal exit, including cancellation and transport failure.
pub(crate) async fn run_stream(
    backend: &dyn ChatBackend,
    clock: &dyn Clock,
    scope: &AgentScope,
    store: &mut ConversationStore,
    status: &mut AgentStatus,
    message_id: &str,
    conversation_id: &str,
    cancel: Option<&CancelSignal>,
) -> Result<(), ChatError> {
    *status = AgentStatus::Running;
    debug!(message_id, conversation_id, "stream run started");

    let result = drive(
        backend,
        clock,
        scope,
        store,
        message_id,
        conversation_id,
        cancel,
    )
    .await;

    *status = AgentStatus::Ready;
    debug!(message_id, ok = result.is_ok(), "stream run finished");
    result
}

async fn drive(
    backend: &dyn ChatBackend,
    clock: &dyn Clock,
    scope: &AgentScope,
    store: &mut ConversationStore,
    message_id: &str,
    conversation_id: &str,
    cancel: Option<&CancelSignal>,
) -> Result<(), ChatError> {
    loop {
        if is_cancelled(cancel) {
            return Err(ChatError::Cancelled);
        }

        let snapshot = backend.stream_message(scope, message_id).await?;
        if apply_snapshot(store, message_id, conversation_id, &snapshot, clock.now_ms())?
            == PollStep::Done
        {
            return Ok(());
        }

        clock.sleep(STREAM_POLL_INTERVAL).await;
    }
}

/// Fold one poll response into the log.
///
/// - Complete: finalize the existing (partial) entry in place, or append an
///   already-complete message. Terminal either way.
/// - Incomplete with non-empty partial text: append a partial entry on first
///   sight, overwrite in place when the text changed, and do nothing when it
///   is unchanged so an identical poll never re-timestamps the entry.
/// - Incomplete with no text yet: no mutation.
///
/// Equality is on the generated-result string only.
pub(crate) fn apply_snapshot(
    store: &mut ConversationStore,
    message_id: &str,
    conversation_id: &str,
    snapshot: &StreamSnapshot,
    now_ms: i64,
) -> Result<PollStep, ChatError> {
    if snapshot.completed {
        let content = snapshot.generated.as_deref().unwrap_or_default();
        if !store.finalize(message_id, content, snapshot.references.clone(), now_ms) {
            store.push(Message::complete_bot(
                message_id,
                content,
                conversation_id,
                snapshot.references.clone(),
                now_ms,
            ))?;
        }
        return Ok(PollStep::Done);
    }

    if let Some(partial) = snapshot.generated.as_deref().filter(|text| !text.is_empty()) {
        if store.bot_position(message_id).is_some() {
            store.overwrite_partial(message_id, partial, now_ms);
        } else {
            store.push(Message::partial_bot(
                message_id,
                partial,
                conversation_id,
                now_ms,
            ))?;
        }
    }

    Ok(PollStep::Continue)
}

pub(crate) fn is_cancelled(cancel: Option<&CancelSignal>) -> bool {
    cancel.is_some_and(|token| token.load(Ordering::Acquire))
}
