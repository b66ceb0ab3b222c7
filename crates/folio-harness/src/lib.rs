//! Deterministic simulation harness for Folio.
//!
//! Runs the production [`folio_app::Runtime`] against a scripted driver and
//! tokio's paused clock, so stagger delays and confirmation timeouts can be
//! asserted to the millisecond without waiting on real time.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! App invariants; [`SimDriver`] checks them on every render.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod script;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    ActivePathMatchesRouter, FormSnapshot, Invariant, InvariantRegistry, InvariantResult,
    RevealCountBounded, RevealSnapshot, ScreenMatchesPage, ScrolledMatchesOffset,
    SingleScrollListener, SystemSnapshot, Violation,
};
pub use script::{Script, ScriptedEvent};
pub use sim_driver::{Frame, SimDriver, SimDriverError, SimHandle};
pub use sim_env::SimEnv;
