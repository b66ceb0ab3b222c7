//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: site state machine
//! - [`Driver`]: Platform-specific I/O
//! - [`Environment`]: clock and sleeping
//!
//! Each cycle asks the App for its next timer deadline, waits on the driver
//! for an event up to that deadline, stamps the event (or a tick, on timeout)
//! with the current time and executes the resulting actions.

use folio_core::{ConfigError, config::SiteConfig, env::Environment};

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment providing the clock
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    env: E,
    app: App<E::Instant>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver<Instant = E::Instant>,
    E: Environment,
{
    /// Create a new runtime, mounting the initial page at the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the site configuration is invalid.
    pub fn new(driver: D, env: E, config: SiteConfig) -> Result<Self, ConfigError> {
        let app = App::new(config, env.now())?;
        Ok(Self { driver, env, app })
    }

    /// Run the main event loop until the App asks to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let timeout = self.app.next_deadline().map(|deadline| self.env.until(deadline));
        let event = self.driver.poll_event(timeout).await?.unwrap_or(AppEvent::Tick);

        let now = self.env.now();
        let actions = self.app.handle(event, now);
        self.process_actions(actions)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::ScrollToTop => self.driver.scroll_to(0),
                AppAction::RouteNotFound { path } => {
                    tracing::warn!(%path, "no route; showing fallback");
                },
                AppAction::SubmitContact(submission) => {
                    tracing::info!(
                        name = %submission.name,
                        email = %submission.email,
                        message_len = submission.message.len(),
                        "contact message submitted (not transmitted)"
                    );
                },
            }
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App<E::Instant> {
        &self.app
    }
}
