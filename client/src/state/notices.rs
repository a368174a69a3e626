//! User-visible notices (toasts) and the missing-configuration notifier.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host reports which required configuration keys are absent. The chat
//! page hands that list to [`MissingConfigNotifier`], which turns each key
//! into one error notice per mount. Refetches and re-renders with the same
//! list produce nothing new.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

use std::collections::HashSet;

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Ordered list of visible notices.
#[derive(Clone, Debug, Default)]
pub struct NoticeCenter {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeCenter {
    /// Add a notice and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice { id, level, message: message.into() });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

/// Text shown for one absent configuration key.
#[must_use]
pub fn missing_key_message(key: &str) -> String {
    format!("Missing {key} environment variable!")
}

/// Emits one warning per missing key, once per mount.
#[derive(Clone, Debug, Default)]
pub struct MissingConfigNotifier {
    announced: HashSet<String>,
}

impl MissingConfigNotifier {
    /// Push a notice for every key in `keys` not yet announced.
    ///
    /// Returns the ids of the notices created by this call.
    pub fn notify(&mut self, keys: &[String], center: &mut NoticeCenter) -> Vec<u64> {
        let mut created = Vec::new();
        for key in keys {
            let key = key.trim();
            if key.is_empty() || !self.announced.insert(key.to_owned()) {
                continue;
            }
            leptos::logging::warn!("configuration key missing: {key}");
            created.push(center.push(NoticeLevel::Error, missing_key_message(key)));
        }
        created
    }
}
