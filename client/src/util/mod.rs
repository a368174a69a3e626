//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so the state controllers stay testable without a DOM.

pub mod device;
pub mod markdown;
pub mod media;
pub mod navigation;
pub mod scroll_observer;
pub mod ui_persistence;
