//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`folio_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Input comes from a [`Script`] of timed events. Every render is captured as
//! a [`Frame`] (a [`SystemSnapshot`] stamped with its virtual time) and, if a
//! registry is attached, checked against invariants. Once the script runs dry
//! the driver lets pending timers fire and then presses Esc until the app
//! quits.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use folio_app::{App, AppEvent, Driver, KeyInput};
use folio_core::env::Environment;
use thiserror::Error;

use crate::{
    Script, SimEnv,
    invariants::{InvariantRegistry, SystemSnapshot, Violation},
};

/// Error type for simulation driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimDriverError {
    /// A rendered state broke one or more invariants.
    #[error("invariant violation at {at:?}: {}", format_violations(.violations))]
    Invariant {
        /// Virtual time of the offending frame.
        at: Duration,
        /// Every violated invariant.
        violations: Vec<Violation>,
    },
}

fn format_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// One rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Virtual time since the driver started.
    pub at: Duration,
    /// Rendered state.
    pub snapshot: SystemSnapshot,
}

/// State shared between the driver and its handles.
#[derive(Debug, Default)]
struct SharedState {
    script: Script,
    frames: Vec<Frame>,
    scroll_requests: Vec<u32>,
    stopped: bool,
}

/// Read access to a driver's recorded output, usable after the runtime has
/// consumed the driver.
#[derive(Debug, Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SharedState>>,
}

impl SimHandle {
    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every rendered frame, in order.
    pub fn frames(&self) -> Vec<Frame> {
        self.lock().frames.clone()
    }

    /// Last rendered frame. `None` if nothing rendered.
    pub fn last_frame(&self) -> Option<Frame> {
        self.lock().frames.last().cloned()
    }

    /// First frame satisfying `predicate`.
    pub fn first_frame(&self, predicate: impl Fn(&SystemSnapshot) -> bool) -> Option<Frame> {
        self.lock().frames.iter().find(|f| predicate(&f.snapshot)).cloned()
    }

    /// Offsets the runtime asked the host to scroll to.
    pub fn scroll_requests(&self) -> Vec<u32> {
        self.lock().scroll_requests.clone()
    }

    /// Scripted events not yet delivered.
    pub fn remaining_events(&self) -> usize {
        self.lock().script.len()
    }

    /// Whether the runtime stopped the driver.
    pub fn stopped(&self) -> bool {
        self.lock().stopped
    }
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`folio_app::Runtime`]
/// orchestration code runs in both the terminal and simulation tests.
pub struct SimDriver {
    env: SimEnv,
    started: tokio::time::Instant,
    state: Arc<Mutex<SharedState>>,
    invariants: Option<InvariantRegistry>,
}

impl SimDriver {
    /// Create a driver that replays `script`, starting the clock now.
    pub fn new(env: SimEnv, script: Script) -> Self {
        let started = env.now();
        let state = SharedState { script, ..SharedState::default() };
        Self { env, started, state: Arc::new(Mutex::new(state)), invariants: None }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Handle for inspecting recorded output.
    pub fn handle(&self) -> SimHandle {
        SimHandle { state: Arc::clone(&self.state) }
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn elapsed(&self) -> Duration {
        self.env.now() - self.started
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = tokio::time::Instant;

    async fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<AppEvent>, Self::Error> {
        let next = self.lock().script.peek_offset();

        let Some(at) = next else {
            return match timeout {
                Some(timeout) => {
                    self.env.sleep(timeout).await;
                    Ok(None)
                },
                None => Ok(Some(AppEvent::Key(KeyInput::Esc))),
            };
        };

        let wait = at.saturating_sub(self.elapsed());
        if let Some(timeout) = timeout
            && timeout < wait
        {
            self.env.sleep(timeout).await;
            return Ok(None);
        }

        self.env.sleep(wait).await;
        let scripted = self.lock().script.pop();
        tracing::trace!(event = ?scripted.as_ref().map(|s| &s.event), "scripted event");
        Ok(scripted.map(|s| s.event))
    }

    fn render(&mut self, app: &App<Self::Instant>) -> Result<(), Self::Error> {
        let at = self.elapsed();
        let snapshot = SystemSnapshot::from_app(app);

        if let Some(registry) = &self.invariants
            && let Err(violations) = registry.check_all(&snapshot)
        {
            tracing::warn!(?at, count = violations.len(), "invariant violated");
            return Err(SimDriverError::Invariant { at, violations });
        }

        self.lock().frames.push(Frame { at, snapshot });
        Ok(())
    }

    fn scroll_to(&mut self, offset: u32) {
        self.lock().scroll_requests.push(offset);
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
