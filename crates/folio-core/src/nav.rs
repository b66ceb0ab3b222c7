//! Navigation bar state.
//!
//! [`NavState`] holds the active link, the mobile menu flag and the
//! "scrolled" background flag. The active link is never set optimistically:
//! [`NavState::select_link`] only produces a [`NavigationRequest`], and the
//! active path changes when the router confirms the route through
//! [`NavState::confirm_route`]. Back/forward navigation goes through the same
//! confirmation, so the navbar and the router cannot disagree.

use crate::viewport::is_scrolled;

/// Request to change route, produced by link selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Requested path.
    pub path: String,
}

/// Navbar state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    active_path: String,
    mobile_menu_open: bool,
    scrolled: bool,
}

impl NavState {
    /// Create navbar state for the router's current path.
    pub fn new(current_path: impl Into<String>) -> Self {
        Self { active_path: current_path.into(), mobile_menu_open: false, scrolled: false }
    }

    /// Path of the active link.
    pub fn active_path(&self) -> &str {
        &self.active_path
    }

    /// Whether the link for `path` is the active one.
    pub fn is_active(&self, path: &str) -> bool {
        self.active_path == path
    }

    /// Whether the mobile menu overlay is open.
    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Whether the page is scrolled past the background threshold.
    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    /// Flip the mobile menu. Returns the new state.
    pub fn toggle_mobile_menu(&mut self) -> bool {
        self.mobile_menu_open = !self.mobile_menu_open;
        tracing::debug!(open = self.mobile_menu_open, "mobile menu toggled");
        self.mobile_menu_open
    }

    /// Close the mobile menu. Returns true if it was open.
    pub fn close_mobile_menu(&mut self) -> bool {
        std::mem::replace(&mut self.mobile_menu_open, false)
    }

    /// Select a link.
    ///
    /// Closes the mobile menu and requests the route change. The active path
    /// is left alone until [`Self::confirm_route`].
    pub fn select_link(&mut self, path: impl Into<String>) -> NavigationRequest {
        self.mobile_menu_open = false;
        NavigationRequest { path: path.into() }
    }

    /// Adopt a route the router has confirmed.
    ///
    /// The only writer of the active path. Also closes the mobile menu.
    pub fn confirm_route(&mut self, path: impl Into<String>) {
        self.active_path = path.into();
        self.mobile_menu_open = false;
    }

    /// Update the scrolled flag from a scroll offset.
    ///
    /// Returns true if the flag changed.
    pub fn set_scroll_offset(&mut self, offset: u32) -> bool {
        let scrolled = is_scrolled(offset);
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}
