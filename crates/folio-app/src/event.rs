//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from the host: keyboard and pointer input, scroll and
//! resize notifications, layout measurements of the tracked page region, and
//! timer ticks.

use folio_core::{contact::Field, viewport::Region};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Timer tick. Fires due reveal and confirmation timers.
    Tick,

    /// Viewport resized to the given visible height.
    Resize {
        /// Visible height.
        height: u32,
    },

    /// Viewport scrolled to an absolute offset.
    Scroll {
        /// Vertical scroll offset.
        offset: u32,
    },

    /// Layout measured the active page's tracked region.
    Layout {
        /// Region in document coordinates. `None` if not rendered.
        region: Option<Region>,
    },

    /// A navbar link was clicked.
    Navigate {
        /// Link target.
        path: String,
    },

    /// Browser-style back navigation.
    HistoryBack,

    /// Browser-style forward navigation.
    HistoryForward,

    /// Mobile menu button pressed.
    ToggleMenu,

    /// Click outside the open mobile menu.
    CloseMenu,

    /// Pointer moved onto or off the hero card.
    HeroCardHover {
        /// Whether the pointer is over the card.
        hovered: bool,
    },

    /// Contact form field changed.
    FormInput {
        /// Edited field.
        field: Field,
        /// New value.
        value: String,
    },

    /// Contact form submitted.
    SubmitForm,
}
