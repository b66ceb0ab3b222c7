//! Simulation environment on tokio's virtual clock.
//!
//! `SimEnv` reads time from `tokio::time::Instant`. Under a paused runtime
//! (`#[tokio::test(start_paused = true)]`) the clock only moves when every
//! task is idle, and then jumps straight to the next timer, so a 3 second
//! confirmation completes instantly and lands on an exact instant.

use std::time::Duration;

use folio_core::env::Environment;

/// Environment backed by tokio's (pausable) clock.
#[derive(Clone, Debug, Default)]
pub struct SimEnv;

impl SimEnv {
    /// Create a new simulation environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SimEnv {
    type Instant = tokio::time::Instant;

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
