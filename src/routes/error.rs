//! API error type mapped to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chatdesk_client::net::types::ApiErrorBody;

/// Errors produced by `/api/*` handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request is malformed (e.g. an empty chat message).
    #[error("{0}")]
    BadRequest(String),

    /// No authenticated user on the request.
    #[error("not authenticated")]
    Unauthenticated,

    /// The requested resource is not configured on this host.
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// `CHAT_BACKEND_URL` is unset.
    #[error("chat backend not configured")]
    BackendUnavailable,

    /// The chat backend failed or answered with something unusable.
    #[error("chat backend error: {0}")]
    Upstream(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotConfigured(_) => StatusCode::NOT_FOUND,
            Self::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(%status, error = %self, "api request failed");
        }
        (status, Json(ApiErrorBody { error: self.to_string() })).into_response()
    }
}
