//! Observable application state types.
//!
//! These structures serve as the "View Model" for renderers: what is on
//! screen, without the timing machinery that decides it.

use folio_core::router::ViewId;

/// What the main area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// A routed page.
    Page(ViewId),
    /// Fallback for a path with no route.
    NotFound {
        /// Requested path.
        path: String,
    },
}

impl Screen {
    /// Routed view. `None` for the fallback.
    pub fn view(&self) -> Option<ViewId> {
        match self {
            Self::Page(view) => Some(*view),
            Self::NotFound { .. } => None,
        }
    }
}
