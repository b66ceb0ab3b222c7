//! Error types for the Folio core.
//!
//! Strongly-typed errors per concern: routing (missing or duplicate routes),
//! viewport and site configuration, and contact form validation.
//!
//! Measurement failures are deliberately absent: a region that cannot be
//! measured degrades to "not in view" instead of producing an error.

use thiserror::Error;

use crate::{contact::Field, router::ViewId};

/// Errors produced by the route table and router.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No route matches the requested path exactly.
    #[error("no route for path {path:?}")]
    NotFound {
        /// Path that failed to resolve.
        path: String,
    },

    /// Route table contains the same path twice.
    #[error("duplicate route path {path:?}")]
    DuplicatePath {
        /// Path that appears more than once.
        path: String,
    },

    /// Route path does not start with `/`.
    #[error("route path {path:?} must start with '/'")]
    RelativePath {
        /// Offending path.
        path: String,
    },
}

impl RouteError {
    /// Returns true if the error is a missing-route fault that callers should
    /// answer with a fallback view.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors produced when configuring a viewport observer.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ViewportError {
    /// Visibility threshold outside `[0.0, 1.0]` (or NaN).
    #[error("visibility threshold {0} is outside [0.0, 1.0]")]
    InvalidThreshold(f64),
}

/// Errors in a site configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A page's reveal trigger has an unusable threshold.
    #[error("reveal config for {view}: {source}")]
    Reveal {
        /// Page whose config is invalid.
        view: ViewId,
        /// Underlying viewport error.
        source: ViewportError,
    },

    /// Route table or initial path is invalid.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Contact form validation errors.
///
/// Reported synchronously; no submission happens while any of these apply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Required field is empty.
    #[error("{0} is required")]
    MissingField(Field),

    /// Email field does not look like an address.
    #[error("{value:?} is not a valid email address")]
    InvalidEmail {
        /// Rejected email value.
        value: String,
    },

    /// Form is still showing the confirmation of a previous submission.
    #[error("previous message is still being confirmed")]
    ConfirmationPending,
}
