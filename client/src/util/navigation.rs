//! Address-bar and page-data refresh adapters for the lifecycle controller.
//!
//! TRADE-OFFS
//! ==========
//! The URL is rewritten with `history.replaceState`, which changes the
//! address without a navigation, so the router never remounts the chat page.
//! A "refresh" re-runs the page's server-backed resources instead of
//! reloading the document.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use leptos::prelude::{RwSignal, Update};

use crate::state::lifecycle::{PageRefresher, UrlSurface};

/// Browser location/history as a [`UrlSurface`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserUrl;

impl UrlSurface for BrowserUrl {
    fn current_path(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn replace_path(&self, path: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
                leptos::logging::warn!("history unavailable, url not rewritten");
                return;
            };
            if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)) {
                leptos::logging::warn!("replaceState failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
        }
    }
}

/// Bumps a sequence signal that page resources depend on.
#[derive(Clone, Copy, Debug)]
pub struct SignalRefresher {
    seq: RwSignal<u64>,
}

impl SignalRefresher {
    #[must_use]
    pub fn new(seq: RwSignal<u64>) -> Self {
        Self { seq }
    }
}

impl PageRefresher for SignalRefresher {
    fn refresh(&self) {
        self.seq.update(|n| *n += 1);
    }
}
