//! Session lookup from the fronting proxy's user header.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authentication happens upstream of this host. The proxy forwards the
//! signed-in user in a configurable header; its presence is the session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use chatdesk_client::net::types::SessionUser;

use super::error::ApiError;
use crate::state::AppState;

/// Resolve the user from `header`, if the proxy set it.
pub(crate) fn session_user(headers: &HeaderMap, header: &str) -> Option<SessionUser> {
    let value = headers.get(header)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    let name = value.split('@').next().unwrap_or(value).to_owned();
    Some(SessionUser { id: value.to_owned(), name })
}

/// `GET /api/auth/me`: current user or 401.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<SessionUser>, ApiError> {
    session_user(&headers, &state.config.auth_user_header)
        .map(Json)
        .ok_or(ApiError::Unauthenticated)
}
