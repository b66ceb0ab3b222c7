//! Terminal UI for Folio
//!
//! A thin shell over [`folio_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`folio_app::Runtime`].
//!
//! This crate only turns terminal input into events and draws frames.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod content;
pub mod system_env;
pub mod terminal;
pub mod ui;

pub use folio_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use system_env::SystemEnv;
pub use terminal::{TerminalDriver, TerminalError};
