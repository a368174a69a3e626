//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`conversation`, `lifecycle`, `scroll_anchor`,
//! etc.) so each controller is a plain struct that can be tested without a
//! browser. Components hold them in signals and feed them browser events.

pub mod call;
pub mod conversation;
pub mod dashboard;
pub mod lifecycle;
pub mod notices;
pub mod scroll_anchor;
pub mod session;
pub mod submission;
pub mod view;
