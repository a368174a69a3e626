//! Page view selection (chat / dashboard / education).
//!
//! DESIGN
//! ======
//! Exactly one view subtree is mounted at a time. Switching is an explicit
//! transition that reports which view unmounts and which mounts, carrying the
//! scroll offset to restore, so the chat feed resumes where it was left.
//! Conversation state lives above the views and is never touched here.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

/// Mutually exclusive page views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Chat,
    Dashboard,
    Education,
}

impl ViewMode {
    /// Views in header-menu order.
    pub const ALL: [ViewMode; 3] = [ViewMode::Chat, ViewMode::Dashboard, ViewMode::Education];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Chat => "Chat",
            ViewMode::Dashboard => "Dashboard",
            ViewMode::Education => "Education",
        }
    }

    fn index(self) -> usize {
        match self {
            ViewMode::Chat => 0,
            ViewMode::Dashboard => 1,
            ViewMode::Education => 2,
        }
    }
}

/// Unmount/mount hook produced by a view change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSwitch {
    pub from: ViewMode,
    pub to: ViewMode,
    /// Scroll offset the incoming view had when it was last unmounted.
    pub restore_scroll: Option<f64>,
}

/// Single source of truth for the active view.
#[derive(Clone, Debug, Default)]
pub struct ViewSelector {
    active: ViewMode,
    saved_scroll: [Option<f64>; 3],
}

impl ViewSelector {
    #[must_use]
    pub fn active(&self) -> ViewMode {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, view: ViewMode) -> bool {
        self.active == view
    }

    /// Switch to `next`, remembering `outgoing_scroll_top` for the current view.
    ///
    /// Selecting the active view is a no-op and returns `None`.
    pub fn select(&mut self, next: ViewMode, outgoing_scroll_top: f64) -> Option<ViewSwitch> {
        if next == self.active {
            return None;
        }

        let from = self.active;
        self.saved_scroll[from.index()] = Some(outgoing_scroll_top);
        self.active = next;

        Some(ViewSwitch { from, to: next, restore_scroll: self.saved_scroll[next.index()] })
    }
}
