//! # chatdesk-client
//!
//! Leptos + WASM frontend for the chat desk: an assistant conversation feed
//! with optimistic sends, a bottom-pinned scroll anchor, an embedded
//! analytics dashboard, an education view and a microphone call handshake.
//!
//! The host crate depends on this one with the `ssr` feature to render the
//! same components server-side and to share the `/api/*` wire types.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
