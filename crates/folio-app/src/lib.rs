//! Application layer for Folio
//!
//! Pure state machines and generic runtime for the portfolio site, enabling
//! deterministic simulation testing with the same code that runs in the
//! terminal.
//!
//! # Components
//!
//! - [`App`]: site state machine (routing, mounted page, navbar, form)
//! - [`Navbar`]: navbar state bound to its scroll listener
//! - [`Page`]: the mounted page with its reveal and widgets
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod navbar;
mod page;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use navbar::{NAVBAR_LISTENER, Navbar};
pub use page::Page;
pub use runtime::Runtime;
pub use state::Screen;
