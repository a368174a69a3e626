//! Conversation identity and length-driven lifecycle transitions.
//!
//! ARCHITECTURE
//! ============
//! The controller is a small state machine over the feed length:
//!
//! - `New` (0 turns): identity resolved and persisted, nothing else.
//! - `FirstTurn` (1 turn): authenticated sessions get the URL rewritten to
//!   `/chat/{id}` once, without navigation.
//! - `ExchangeComplete` (2+ turns): one page data refresh, fired on the edge
//!   where the length first reaches two.
//!
//! Browser concerns (storage, history, refresh) sit behind the
//! [`IdentityStore`], [`UrlSurface`] and [`PageRefresher`] seams so the page
//! passes explicit handles instead of reaching for globals.
//!
//! ERROR HANDLING
//! ==============
//! A failed identity write is logged and the controller continues with an
//! in-memory identity for the rest of the session.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::cell::RefCell;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::session::Session;

/// Storage key for the last conversation identity.
pub const IDENTITY_STORAGE_KEY: &str = "newChatId";

/// Opaque token identifying one conversation across reloads.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path that addresses this conversation.
    #[must_use]
    pub fn chat_path(&self) -> String {
        format!("/chat/{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ConversationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure to write the persisted identity.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No durable storage in this environment.
    #[error("identity storage unavailable")]
    Unavailable,
    /// The write was rejected (quota, privacy mode).
    #[error("identity write failed: {0}")]
    Write(String),
}

/// Durable key/value slot the conversation identity is written to.
///
/// The controller never reads it back: a mount without a route id always
/// starts a new conversation.
pub trait IdentityStore {
    /// Overwrite the stored identity.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the value cannot be persisted.
    fn save(&self, value: &str) -> Result<(), StoreError>;
}

/// Read/rewrite access to the address bar.
pub trait UrlSurface {
    fn current_path(&self) -> String;
    /// Replace the current history entry without navigating.
    fn replace_path(&self, path: &str);
}

/// Re-fetches server-provided page data.
pub trait PageRefresher {
    fn refresh(&self);
}

/// In-process identity store for SSR and tests.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    value: RefCell<Option<String>>,
}

impl MemoryIdentityStore {
    #[cfg(test)]
    pub(crate) fn stored(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn save(&self, value: &str) -> Result<(), StoreError> {
        *self.value.borrow_mut() = Some(value.to_owned());
        Ok(())
    }
}

/// Side effects performed by one [`ConversationLifecycle::sync`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LifecycleEffects {
    /// Path written with `replace_path`, if any.
    pub rewrote_url: Option<String>,
    /// Whether the page refresh fired.
    pub refreshed: bool,
}

/// Owns the conversation identity and its length-driven transitions.
#[derive(Clone, Debug)]
pub struct ConversationLifecycle {
    identity: ConversationId,
    persisted: bool,
    last_len: usize,
    identity_announced: bool,
    refresh_fired: bool,
}

impl ConversationLifecycle {
    /// Resolve the identity and persist it.
    ///
    /// The identity is `supplied` (the route id) or a fresh id; a previously
    /// stored value is never adopted. `initial_len` is the length of any
    /// history already shown, so mounting an existing conversation never
    /// fires the refresh.
    pub fn mount(supplied: Option<ConversationId>, store: &dyn IdentityStore, initial_len: usize) -> Self {
        let identity = supplied.unwrap_or_else(ConversationId::generate);

        let mut lifecycle = Self {
            identity,
            persisted: false,
            last_len: initial_len,
            identity_announced: false,
            refresh_fired: initial_len >= 2,
        };
        lifecycle.persist(store);
        lifecycle
    }

    /// Write the identity to durable storage.
    ///
    /// Runs on every mount as an idempotent overwrite. Failure leaves the
    /// identity in memory only.
    fn persist(&mut self, store: &dyn IdentityStore) {
        match store.save(self.identity.as_str()) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                self.persisted = false;
                leptos::logging::warn!("identity not persisted, using in-memory id {}: {e}", self.identity);
            }
        }
    }

    /// React to a new feed length.
    pub fn sync(
        &mut self,
        len: usize,
        session: &Session,
        url: &dyn UrlSurface,
        refresher: &dyn PageRefresher,
    ) -> LifecycleEffects {
        let mut effects = LifecycleEffects::default();

        if len >= 1 && !self.identity_announced && session.is_authenticated() {
            self.identity_announced = true;
            let path = url.current_path();
            if !path_reflects_conversation(&path) {
                let next = self.identity.chat_path();
                leptos::logging::log!("conversation {} started, rewriting url to {next}", self.identity);
                url.replace_path(&next);
                effects.rewrote_url = Some(next);
            }
        }

        let crossed_exchange = self.last_len < 2 && len >= 2;
        if crossed_exchange && !self.refresh_fired {
            self.refresh_fired = true;
            leptos::logging::log!("first exchange complete for {}, refreshing page data", self.identity);
            refresher.refresh();
            effects.refreshed = true;
        }

        self.last_len = self.last_len.max(len);
        effects
    }

    #[must_use]
    pub fn identity(&self) -> &ConversationId {
        &self.identity
    }

    /// `false` when the identity only lives in memory.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }
}

/// True when the path already addresses a conversation.
#[must_use]
pub fn path_reflects_conversation(path: &str) -> bool {
    path.split('/').any(|segment| segment == "chat")
}
