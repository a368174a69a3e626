//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! host keeps no per-conversation state: it holds the parsed configuration
//! and one pooled HTTP client for the chat backend.

use std::sync::Arc;

use crate::config::HostConfig;

/// Shared application state. Clone is required by Axum; fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HostConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state around `config`, with the backend timeout applied to the client.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error when the HTTP client cannot be constructed.
    pub fn new(config: HostConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.chat_backend_timeout).build()?;
        Ok(Self { config: Arc::new(config), http })
    }
}
