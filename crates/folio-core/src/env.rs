//! Environment abstraction for deterministic testing.
//!
//! Decouples state machines from wall-clock time. Production hosts use real
//! system time; simulation uses a virtual clock (tokio's paused clock) so that
//! stagger timings can be asserted exactly.

use std::{
    fmt::Debug,
    ops::{Add, Sub},
    time::Duration,
};

/// Monotonic point in time usable by the state machines.
///
/// Blanket-implemented for any type with instant-like arithmetic, so both
/// `std::time::Instant` and `tokio::time::Instant` qualify.
pub trait Timestamp:
    Copy + Ord + Send + Sync + Debug + Add<Duration, Output = Self> + Sub<Output = Duration>
{
}

impl<T> Timestamp for T where
    T: Copy + Ord + Send + Sync + Debug + Add<Duration, Output = T> + Sub<Output = Duration>
{
}

/// Abstract environment providing time and async sleeping.
///
/// # Invariants
///
/// - `now()` never goes backwards
/// - Methods are infallible
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while simulation
    /// environments use virtual time (e.g., `tokio::time::Instant` with a
    /// paused clock).
    type Instant: Timestamp;

    /// Current time (monotonic).
    ///
    /// Subsequent calls must return times >= previous calls.
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only driver and runtime code should sleep; state machines take `now`
    /// as a parameter instead.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;

    /// Time remaining until `deadline`, saturating at zero.
    fn until(&self, deadline: Self::Instant) -> Duration {
        let now = self.now();
        if deadline > now { deadline - now } else { Duration::ZERO }
    }
}
