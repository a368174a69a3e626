//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chat page chrome and views while reading/writing
//! the controllers the page passes down as signals and callbacks.

pub mod chat_list;
pub mod chat_panel;
pub mod dashboard_embed;
pub mod education;
pub mod empty_screen;
pub mod header_menu;
pub mod prompt_form;
pub mod toast_stack;
