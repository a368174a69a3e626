//! Prompt submission pipeline: optimistic append, backend call, confirmation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat panel spawns one `submit_user_message` future per prompt. Nothing
//! serializes submissions: a second prompt may be sent while the first is in
//! flight, so confirmed turns land in completion order while local turns keep
//! submission order.
//!
//! ERROR HANDLING
//! ==============
//! Backend failures are returned to the caller untouched. The pipeline does
//! not retry and does not remove the optimistic turn.

#[cfg(test)]
#[path = "submission_test.rs"]
mod submission_test;

use std::future::Future;

use super::conversation::{ConversationTurn, TurnId, TurnPayload, TurnSink};
use super::lifecycle::ConversationId;

/// Failure of the backend submission call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("backend returned status {0}")]
    Status(u16),
    /// The response body was not a conversation turn.
    #[error("response decode failed: {0}")]
    Decode(String),
    /// No backend is reachable from this build (server-side render).
    #[error("chat backend unavailable")]
    Unavailable,
}

/// A submission whose optimistic turn has no confirmed counterpart.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("submission {local_id} failed: {source}")]
pub struct SubmissionFailed {
    pub local_id: TurnId,
    #[source]
    pub source: BackendError,
}

/// The opaque assistant backend.
#[allow(async_fn_in_trait)]
pub trait ChatBackend {
    /// Submit trimmed, non-empty `text` for `conversation`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the call fails for any reason.
    fn submit_user_message(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> impl Future<Output = Result<ConversationTurn, BackendError>>;
}

/// Trim prompt input. Returns `None` for blank input, which is never sent.
#[must_use]
pub fn normalize_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_owned())
}

/// Run one submission.
///
/// The local turn is appended before the first suspension point, so it is
/// always visible ahead of its confirmed turn.
///
/// # Errors
///
/// Returns [`SubmissionFailed`] carrying the local turn id when the backend
/// call fails; the queue is left as-is for the caller to annotate.
pub async fn submit_user_message<S, B>(
    sink: &S,
    backend: &B,
    conversation: &ConversationId,
    text: String,
) -> Result<ConversationTurn, SubmissionFailed>
where
    S: TurnSink,
    B: ChatBackend,
{
    let local = sink.append_local(TurnPayload::UserText { text: text.clone() });

    match backend.submit_user_message(conversation, &text).await {
        Ok(turn) => {
            sink.confirm(&local.id, turn.clone());
            Ok(turn)
        }
        Err(source) => Err(SubmissionFailed { local_id: local.id, source }),
    }
}
