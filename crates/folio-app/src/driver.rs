//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input and rendering, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::{future::Future, time::Duration};

use folio_core::env::Timestamp;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal and in simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events and ratatui for drawing
/// - **Simulation**: Replays a scripted event list against a paused clock
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
/// - [`Instant`](Driver::Instant): Time representation (real or virtual)
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Timestamp;

    /// Wait for the next input event.
    ///
    /// Returns `None` if `timeout` elapsed first. A `None` timeout waits
    /// until the driver has something to report.
    fn poll_event(
        &mut self,
        timeout: Option<Duration>,
    ) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App<Self::Instant>) -> Result<(), Self::Error>;

    /// Move the host scroll position to `offset`.
    fn scroll_to(&mut self, offset: u32);

    /// Stop the driver and clean up resources.
    fn stop(&mut self);
}
