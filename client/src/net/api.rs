//! REST API helpers for communicating with the host.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning empty values or
//! [`BackendError::Unavailable`], since these endpoints are only called from
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Session, config and dashboard fetches degrade to "absent" on failure so
//! the chat page always renders. Chat submission returns a typed
//! [`BackendError`] that the submission pipeline reports per turn.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ConversationTurn, DashboardReport};
use crate::state::lifecycle::ConversationId;
use crate::state::session::Session;
use crate::state::submission::{BackendError, ChatBackend};
#[cfg(feature = "hydrate")]
use super::types::{ChatRequest, SessionUser};

pub const SESSION_ENDPOINT: &str = "/api/auth/me";
pub const MISSING_KEYS_ENDPOINT: &str = "/api/config/missing-keys";
pub const DASHBOARD_EMBED_ENDPOINT: &str = "/api/dashboard/embed";
pub const CHAT_ENDPOINT: &str = "/api/chat";

#[cfg(any(test, feature = "hydrate"))]
fn check_status(status: u16) -> Result<(), BackendError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(BackendError::Status(status))
    }
}

/// Fetch the current session from `/api/auth/me`.
/// Anonymous when not authenticated or on the server.
pub async fn fetch_session() -> Session {
    #[cfg(feature = "hydrate")]
    {
        let Ok(resp) = gloo_net::http::Request::get(SESSION_ENDPOINT).send().await else {
            return Session::anonymous();
        };
        if !resp.ok() {
            return Session::anonymous();
        }
        match resp.json::<SessionUser>().await {
            Ok(user) => Session::authenticated(user),
            Err(e) => {
                leptos::logging::warn!("session decode failed: {e}");
                Session::anonymous()
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Session::anonymous()
    }
}

/// Fetch the names of required configuration keys the host lacks.
pub async fn fetch_missing_keys() -> Vec<String> {
    #[cfg(feature = "hydrate")]
    {
        let Ok(resp) = gloo_net::http::Request::get(MISSING_KEYS_ENDPOINT).send().await else {
            return Vec::new();
        };
        if !resp.ok() {
            return Vec::new();
        }
        resp.json::<Vec<String>>().await.unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Vec::new()
    }
}

/// Fetch the dashboard report descriptor, if the host has one configured.
pub async fn fetch_dashboard_report() -> Option<DashboardReport> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(DASHBOARD_EMBED_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<DashboardReport>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Chat backend reached through the host's `POST /api/chat`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpChatBackend;

impl ChatBackend for HttpChatBackend {
    async fn submit_user_message(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<ConversationTurn, BackendError> {
        #[cfg(feature = "hydrate")]
        {
            let body = ChatRequest { chat_id: conversation.as_str().to_owned(), message: text.to_owned() };
            let resp = gloo_net::http::Request::post(CHAT_ENDPOINT)
                .json(&body)
                .map_err(|e| BackendError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| BackendError::Network(e.to_string()))?;
            check_status(resp.status())?;
            resp.json::<ConversationTurn>()
                .await
                .map_err(|e| BackendError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (conversation, text);
            Err(BackendError::Unavailable)
        }
    }
}
