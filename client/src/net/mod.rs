//! Networking modules for the host's HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the REST calls and implements the chat backend; `types`
//! defines the shared wire schema.

pub mod api;
pub mod types;
