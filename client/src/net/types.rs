//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The host depends on this crate with the `ssr` feature and serializes the
//! same types, so both sides of `/api/*` stay in lockstep. Turn, session and
//! dashboard payloads live with their state modules and are re-exported here.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

pub use crate::state::conversation::{ConversationTurn, TurnId, TurnPayload};
pub use crate::state::dashboard::DashboardReport;
pub use crate::state::session::SessionUser;

/// Body of `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation identity the message belongs to.
    pub chat_id: String,
    /// Trimmed user text.
    pub message: String,
}

/// Error body returned by `/api/*` handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
