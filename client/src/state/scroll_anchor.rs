//! Bottom-pinning model for the chat scroll container.
//!
//! DESIGN
//! ======
//! The anchor is pure geometry bookkeeping. Browser observers (scroll events,
//! `ResizeObserver` on the message list, `IntersectionObserver` on the
//! sentinel) feed it [`ScrollGeometry`] snapshots and apply the
//! [`ScrollCommand`]s it returns on the next animation frame.
//!
//! Auto-stick is decided from the state *before* growth: if the viewport was
//! pinned, it follows the new bottom; if the user had scrolled away, nothing
//! moves until `scroll_to_bottom` is called.

#[cfg(test)]
#[path = "scroll_anchor_test.rs"]
mod scroll_anchor_test;

/// Distance from the maximum offset still treated as "at bottom", in px.
pub const BOTTOM_TOLERANCE_PX: f64 = 25.0;

/// Bottom root margin for the sentinel intersection observer.
pub const SENTINEL_ROOT_MARGIN: &str = "0px 0px -150px 0px";

/// Snapshot of the scroll container's live geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollGeometry {
    /// Largest reachable `scroll_top`.
    #[must_use]
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// How far the viewport sits above the bottom.
    #[must_use]
    pub fn distance_from_bottom(&self) -> f64 {
        (self.max_scroll_top() - self.scroll_top).max(0.0)
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.distance_from_bottom() <= BOTTOM_TOLERANCE_PX
    }
}

/// Viewport adjustment requested by the anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollCommand {
    /// Leave the viewport where it is.
    Stay,
    /// Set `scroll_top` to the given offset.
    ScrollTo(f64),
}

/// Tracks whether the viewport is pinned to the newest content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchor {
    geometry: ScrollGeometry,
    is_at_bottom: bool,
}

impl Default for ScrollAnchor {
    fn default() -> Self {
        Self { geometry: ScrollGeometry::default(), is_at_bottom: true }
    }
}

impl ScrollAnchor {
    /// The user (or a programmatic scroll) moved the viewport.
    pub fn on_scroll(&mut self, geometry: ScrollGeometry) {
        self.geometry = geometry;
        self.is_at_bottom = geometry.is_at_bottom();
    }

    /// The content element changed size; `geometry` is measured after the change.
    pub fn on_content_resize(&mut self, geometry: ScrollGeometry) -> ScrollCommand {
        let grew = geometry.scroll_height > self.geometry.scroll_height;
        let was_pinned = self.is_at_bottom;

        if was_pinned {
            let target = geometry.max_scroll_top();
            self.geometry = ScrollGeometry { scroll_top: target, ..geometry };
            self.is_at_bottom = true;
            if grew || geometry.scroll_top < target {
                return ScrollCommand::ScrollTo(target);
            }
            return ScrollCommand::Stay;
        }

        self.geometry = geometry;
        self.is_at_bottom = geometry.is_at_bottom();
        ScrollCommand::Stay
    }

    /// The sentinel below the last message entered or left the viewport.
    pub fn on_sentinel_visibility(&mut self, visible: bool) -> ScrollCommand {
        if self.is_at_bottom && !visible {
            return ScrollCommand::ScrollTo(self.geometry.max_scroll_top());
        }
        ScrollCommand::Stay
    }

    /// Jump to the newest content and resume auto-stick.
    pub fn scroll_to_bottom(&mut self) -> ScrollCommand {
        let target = self.geometry.max_scroll_top();
        self.geometry.scroll_top = target;
        self.is_at_bottom = true;
        ScrollCommand::ScrollTo(target)
    }

    /// Restore a saved offset, e.g. when the chat view is mounted again.
    pub fn restore(&mut self, scroll_top: f64) -> ScrollCommand {
        // Layout may not have settled yet, so only the lower bound is enforced.
        let clamped = scroll_top.max(0.0);
        self.geometry.scroll_top = clamped;
        self.is_at_bottom = self.geometry.is_at_bottom();
        ScrollCommand::ScrollTo(clamped)
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.is_at_bottom
    }

    #[must_use]
    pub fn geometry(&self) -> ScrollGeometry {
        self.geometry
    }
}
