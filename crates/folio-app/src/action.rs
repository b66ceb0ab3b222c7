//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use folio_core::contact::ContactSubmission;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Reset the host scroll position after a page change.
    ScrollToTop,

    /// A navigation matched no route; the fallback view is showing.
    RouteNotFound {
        /// Requested path.
        path: String,
    },

    /// Hand off a validated contact message.
    ///
    /// Local only: the runtime records it and nothing is transmitted.
    SubmitContact(ContactSubmission),
}
