//! Chat forwarding to the external assistant backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client posts `{chat_id, message}` here; the host forwards the same
//! body to `CHAT_BACKEND_URL` and returns the backend's turn. Turns the
//! backend sends without an id get a fresh UUID so the client can always
//! deduplicate by identity.
//!
//! ERROR HANDLING
//! ==============
//! Nothing is retried. Transport errors, non-2xx statuses and undecodable
//! bodies all map to `502`; a missing backend URL maps to `503`.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use axum::Json;
use axum::extract::State;
use chatdesk_client::net::types::{ChatRequest, ConversationTurn, TurnId, TurnPayload};
use serde::Deserialize;

use super::error::ApiError;
use crate::state::AppState;

/// Turn as the backend returns it; the id is optional upstream.
#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamTurn {
    #[serde(default)]
    id: Option<TurnId>,
    #[serde(flatten)]
    payload: TurnPayload,
}

impl From<UpstreamTurn> for ConversationTurn {
    fn from(turn: UpstreamTurn) -> Self {
        Self { id: turn.id.unwrap_or_else(TurnId::generate), payload: turn.payload }
    }
}

/// Validate and normalize an incoming request.
pub(crate) fn normalize_request(req: ChatRequest) -> Result<ChatRequest, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message is empty".into()));
    }
    Ok(ChatRequest { chat_id: req.chat_id.trim().to_owned(), message: message.to_owned() })
}

/// `POST /api/chat`: forward one user message, return the assistant turn.
pub async fn submit(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Result<Json<ConversationTurn>, ApiError> {
    let req = normalize_request(req)?;
    let url = state.config.chat_backend_url.as_deref().ok_or(ApiError::BackendUnavailable)?;

    let resp = state
        .http
        .post(url)
        .json(&req)
        .send()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Upstream(format!("status {}", status.as_u16())));
    }
    let turn: UpstreamTurn = resp.json().await.map_err(|e| ApiError::Upstream(e.to_string()))?;
    let turn = ConversationTurn::from(turn);

    tracing::info!(chat_id = %req.chat_id, turn_id = %turn.id, "chat turn forwarded");
    Ok(Json(turn))
}
