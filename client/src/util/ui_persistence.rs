//! Browser localStorage backing for the conversation identity.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes the hydrate-only storage glue so the lifecycle controller only
//! sees the [`IdentityStore`] trait. SSR builds have no storage and writes
//! report [`StoreError::Unavailable`].

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

use crate::state::lifecycle::{IdentityStore, StoreError};

/// Identity slot in `window.localStorage` under a fixed key.
#[derive(Clone, Copy, Debug)]
pub struct LocalStorageIdentityStore {
    key: &'static str,
}

impl LocalStorageIdentityStore {
    #[must_use]
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl IdentityStore for LocalStorageIdentityStore {
    fn save(&self, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StoreError::Unavailable)?;
            storage
                .set_item(self.key, value)
                .map_err(|e| StoreError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.key, value);
            Err(StoreError::Unavailable)
        }
    }
}
