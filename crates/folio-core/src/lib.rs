//! Folio core
//!
//! Pure state machines behind the portfolio site: viewport intersection,
//! staggered reveal sequencing, navbar state and client-side routing.
//! Nothing here performs I/O or reads the clock; every time-dependent
//! operation takes `now` as a parameter, so the same code runs against real
//! time in production and virtual time in simulation.
//!
//! # Components
//!
//! - [`viewport::ViewportObserver`]: region/viewport intersection with
//!   transition events
//! - [`subscription::ScrollRegistry`]: scoped scroll listener registration
//! - [`reveal::RevealSequencer`]: staged hidden -> visible state machine
//! - [`nav::NavState`]: active link, mobile menu, scrolled flag
//! - [`router::Router`]: flat route table with history
//! - [`contact::ContactForm`]: local contact form with timed confirmation
//! - [`hover::HoverCard`]: hover-driven card poses
//! - [`skills::SkillMeters`]: staggered growing skill bars

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod contact;
pub mod env;
pub mod error;
pub mod hover;
pub mod motion;
pub mod nav;
pub mod reveal;
pub mod router;
pub mod skills;
pub mod subscription;
pub mod timer;
pub mod viewport;

pub use error::{ConfigError, FormError, RouteError, ViewportError};
