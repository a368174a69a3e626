//! Host configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Parsing goes through a key lookup function so tests can feed a map
//! instead of mutating the process environment. Absent required keys are not
//! an error: the host starts anyway and reports them through
//! `/api/config/missing-keys`, which the client turns into notices.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use chatdesk_client::net::types::DashboardReport;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_USER_HEADER: &str = "x-forwarded-user";
pub const DEFAULT_CHAT_BACKEND_TIMEOUT_SECS: u64 = 60;

pub const CHAT_BACKEND_URL: &str = "CHAT_BACKEND_URL";
pub const DASHBOARD_REPORT_ID: &str = "DASHBOARD_REPORT_ID";
pub const DASHBOARD_EMBED_URL: &str = "DASHBOARD_EMBED_URL";
pub const DASHBOARD_ACCESS_TOKEN: &str = "DASHBOARD_ACCESS_TOKEN";

/// Keys reported as missing when absent or blank, in report order.
pub const REQUIRED_KEYS: [&str; 4] = [CHAT_BACKEND_URL, DASHBOARD_REPORT_ID, DASHBOARD_EMBED_URL, DASHBOARD_ACCESS_TOKEN];

/// Malformed (not merely absent) configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid CHAT_BACKEND_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    pub chat_backend_url: Option<String>,
    pub chat_backend_timeout: Duration,
    pub dashboard: Option<DashboardReport>,
    /// Request header the fronting proxy sets to the signed-in user.
    pub auth_user_header: String,
    pub missing_keys: Vec<String>,
}

impl HostConfig {
    /// Build typed host config from the process environment.
    ///
    /// Optional:
    /// - `PORT` (default 3000)
    /// - `AUTH_USER_HEADER` (default `x-forwarded-user`)
    /// - `CHAT_BACKEND_TIMEOUT_SECS` (default 60)
    ///
    /// Required, reported when absent: see [`REQUIRED_KEYS`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a present value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a present value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match get("CHAT_BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_CHAT_BACKEND_TIMEOUT_SECS,
        };

        let missing_keys = REQUIRED_KEYS
            .into_iter()
            .filter(|&key| get(key).is_none())
            .map(str::to_owned)
            .collect();

        let dashboard = match (get(DASHBOARD_REPORT_ID), get(DASHBOARD_EMBED_URL), get(DASHBOARD_ACCESS_TOKEN)) {
            (Some(report_id), Some(embed_url), Some(access_token)) => {
                Some(DashboardReport { report_id, embed_url, access_token })
            }
            _ => None,
        };

        Ok(Self {
            port,
            chat_backend_url: get(CHAT_BACKEND_URL).map(|url| url.trim_end_matches('/').to_owned()),
            chat_backend_timeout: Duration::from_secs(timeout_secs),
            dashboard,
            auth_user_header: get("AUTH_USER_HEADER")
                .unwrap_or_else(|| DEFAULT_AUTH_USER_HEADER.to_owned())
                .to_ascii_lowercase(),
            missing_keys,
        })
    }
}
