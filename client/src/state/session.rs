//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read-only input to the chat page. Only the presence of a user matters to
//! the lifecycle controller: anonymous sessions never get their URL rewritten.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// Authenticated user marker returned by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
}

/// Session for the current page load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Session {
    #[must_use]
    pub fn authenticated(user: SessionUser) -> Self {
        Self { user: Some(user), loading: false }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None, loading: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
