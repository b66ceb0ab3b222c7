//! Application state machine.
//!
//! This module defines the [`App`] state machine, which composes the core
//! state machines into the running site, completely decoupled from terminal
//! and clock mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs
//! stamped with the current time and produces [`crate::AppAction`]
//! instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Routes navigation through the [`Router`] and confirms the result to the
//!   navbar, so the active link always matches the current route.
//! - Mounts the page for the current route and drops it on navigation.
//! - Fires due reveal, menu and form timers before applying each event.
//! - Tracks the viewport and contact form focus.

use std::collections::BTreeMap;

use folio_core::{
    ConfigError,
    config::SiteConfig,
    contact::{ContactForm, Field},
    env::Timestamp,
    nav::NavState,
    router::{Navigation, RouteTable, Router, ViewId},
    subscription::ScrollRegistry,
    viewport::Viewport,
};

use crate::{
    AppAction, AppEvent, KeyInput, Screen,
    navbar::Navbar,
    page::{Page, PageTemplate},
};

/// Viewport height assumed until the host reports one.
const DEFAULT_VIEWPORT_HEIGHT: u32 = 24;

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug)]
pub struct App<I> {
    config: SiteConfig,
    router: Router,
    /// Validated reveal setup per view.
    templates: BTreeMap<ViewId, PageTemplate>,
    scroll_registry: ScrollRegistry,
    navbar: Navbar<I>,
    /// Mounted page. `None` while the fallback is showing.
    page: Option<Page<I>>,
    /// Path that failed to resolve. `Some` while the fallback is showing.
    not_found: Option<String>,
    viewport: Viewport,
    /// Focused contact form field. `None` if no field has focus.
    focus: Option<Field>,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl<I: Timestamp> App<I> {
    /// Create the app with the standard route table, mounting the initial
    /// page at `now`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Reveal` if a page threshold is out of range
    /// - `ConfigError::Route` if the initial path has no route
    pub fn new(config: SiteConfig, now: I) -> Result<Self, ConfigError> {
        Self::with_routes(config, RouteTable::standard(), now)
    }

    /// Create the app with a custom route table.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_routes(config: SiteConfig, table: RouteTable, now: I) -> Result<Self, ConfigError> {
        config.validate(&table)?;

        let mut templates = BTreeMap::new();
        for view in ViewId::ALL {
            let reveal = *config.reveal(view);
            templates.insert(view, PageTemplate {
                reveal,
                observer: reveal.observer(view)?,
                skill_bars: (view == ViewId::About).then_some(config.skill_bars),
            });
        }

        let router = Router::new(table, &config.initial_path)?;
        let scroll_registry = ScrollRegistry::new();
        let navbar = Navbar::mount(
            &scroll_registry,
            router.current_path(),
            config.menu_stagger,
            config.menu_close_stagger,
        );
        let viewport = Viewport::new(0, DEFAULT_VIEWPORT_HEIGHT);

        let mut app = Self {
            config,
            router,
            templates,
            scroll_registry,
            navbar,
            page: None,
            not_found: None,
            viewport,
            focus: None,
            status_message: None,
        };
        app.mount_current(now);
        Ok(app)
    }

    /// Process an event at `now` and return actions.
    ///
    /// Timers due at or before `now` fire first.
    pub fn handle(&mut self, event: AppEvent, now: I) -> Vec<AppAction> {
        let advanced = self.advance(now);

        let mut actions = match event {
            AppEvent::Tick => vec![],
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Resize { height } => {
                self.viewport.height = height;
                self.observe_viewport(now);
                vec![AppAction::Render]
            },
            AppEvent::Scroll { offset } => {
                self.viewport.scroll_offset = offset;
                self.navbar.on_scroll(offset);
                self.observe_viewport(now);
                vec![AppAction::Render]
            },
            AppEvent::Layout { region } => {
                let changed =
                    self.page.as_mut().is_some_and(|page| !page.observe_region(region, now).is_empty());
                render_if(changed)
            },
            AppEvent::Navigate { path } => self.navigate(&path, now),
            AppEvent::HistoryBack => self.history_back(now),
            AppEvent::HistoryForward => self.history_forward(now),
            AppEvent::ToggleMenu => {
                self.navbar.toggle_menu(now);
                vec![AppAction::Render]
            },
            AppEvent::CloseMenu => render_if(self.navbar.close_menu(now)),
            AppEvent::HeroCardHover { hovered } => {
                let changed = self.page.as_mut().and_then(Page::hover_mut).is_some_and(|card| {
                    if hovered { card.pointer_enter() } else { card.pointer_leave() }
                });
                render_if(changed)
            },
            AppEvent::FormInput { field, value } => render_if(
                self.page.as_mut().and_then(Page::form_mut).is_some_and(|form| form.set_field(field, value)),
            ),
            AppEvent::SubmitForm => self.submit_form(now),
        };

        if advanced && !actions.contains(&AppAction::Render) {
            actions.push(AppAction::Render);
        }
        actions
    }

    /// Fire every timer due at `now`. Returns true if anything changed.
    fn advance(&mut self, now: I) -> bool {
        let confirming = self.form_confirming();
        let menu = self.navbar.tick(now);
        let page = self.page.as_mut().is_some_and(|page| page.tick(now));

        // Confirmation expired; its message goes with it
        if confirming && !self.form_confirming() {
            self.status_message = None;
        }
        menu || page
    }

    fn form_confirming(&self) -> bool {
        self.page.as_ref().and_then(Page::form).is_some_and(ContactForm::is_submitted)
    }

    fn handle_key(&mut self, key: KeyInput, now: I) -> Vec<AppAction> {
        if let Some(field) = self.focus {
            return self.handle_form_key(field, key, now);
        }

        match key {
            KeyInput::Char('q') => vec![AppAction::Quit],
            KeyInput::Char('m') => {
                self.navbar.toggle_menu(now);
                vec![AppAction::Render]
            },
            KeyInput::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                let path = ViewId::ALL
                    .get(index)
                    .and_then(|view| self.router.table().path_of(*view))
                    .map(str::to_string);
                match path {
                    Some(path) => self.navigate(&path, now),
                    None => vec![],
                }
            },
            KeyInput::Esc if self.navbar.close_menu(now) => vec![AppAction::Render],
            KeyInput::Esc => vec![AppAction::Quit],
            KeyInput::Left => self.history_back(now),
            KeyInput::Right => self.history_forward(now),
            KeyInput::Tab if self.form_accepts_input() => {
                self.focus = Some(Field::Name);
                vec![AppAction::Render]
            },
            KeyInput::Char(_) | KeyInput::Enter | KeyInput::Backspace | KeyInput::Tab => vec![],
        }
    }

    fn handle_form_key(&mut self, field: Field, key: KeyInput, now: I) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => {
                self.focus = None;
                vec![AppAction::Render]
            },
            KeyInput::Tab => {
                self.focus = Some(field.next());
                vec![AppAction::Render]
            },
            KeyInput::Enter => self.submit_form(now),
            KeyInput::Char(c) => render_if(
                self.page.as_mut().and_then(Page::form_mut).is_some_and(|form| form.push_char(field, c)),
            ),
            KeyInput::Backspace => render_if(
                self.page.as_mut().and_then(Page::form_mut).is_some_and(|form| form.pop_char(field)),
            ),
            KeyInput::Left | KeyInput::Right => vec![],
        }
    }

    fn form_accepts_input(&self) -> bool {
        self.page.as_ref().and_then(Page::form).is_some_and(|form| !form.is_submitted())
    }

    fn submit_form(&mut self, now: I) -> Vec<AppAction> {
        let Some(form) = self.page.as_mut().and_then(Page::form_mut) else {
            return vec![];
        };

        match form.submit(now) {
            Ok(submission) => {
                self.focus = None;
                self.status_message = Some("Message sent".to_string());
                vec![AppAction::SubmitContact(submission), AppAction::Render]
            },
            Err(e) => {
                tracing::debug!(error = %e, "contact form rejected");
                self.status_message = Some(e.to_string());
                vec![AppAction::Render]
            },
        }
    }

    /// Navigate to `path` as if its navbar link was clicked.
    ///
    /// The active link only moves once the router has confirmed the route.
    /// An unknown path shows the fallback and leaves router and navbar alone.
    pub fn navigate(&mut self, path: &str, now: I) -> Vec<AppAction> {
        let request = self.navbar.select_link(path, now);

        match self.router.navigate(&request.path) {
            Ok(navigation) => self.confirm(&navigation, now),
            Err(e) => {
                tracing::warn!(error = %e, "navigation failed");
                self.page = None;
                self.focus = None;
                self.not_found = Some(request.path.clone());
                vec![AppAction::RouteNotFound { path: request.path }, AppAction::Render]
            },
        }
    }

    fn history_back(&mut self, now: I) -> Vec<AppAction> {
        match self.router.back() {
            Some(navigation) => self.confirm(&navigation, now),
            None => vec![],
        }
    }

    fn history_forward(&mut self, now: I) -> Vec<AppAction> {
        match self.router.forward() {
            Some(navigation) => self.confirm(&navigation, now),
            None => vec![],
        }
    }

    /// Adopt a route the router confirmed, remounting if the view changed.
    fn confirm(&mut self, navigation: &Navigation, now: I) -> Vec<AppAction> {
        self.navbar.confirm_route(&navigation.path, now);
        self.not_found = None;

        if self.page.as_ref().is_some_and(|page| page.view() == navigation.view) {
            return vec![AppAction::Render];
        }

        self.viewport.scroll_offset = 0;
        self.navbar.on_scroll(0);
        self.mount_current(now);
        vec![AppAction::ScrollToTop, AppAction::Render]
    }

    /// Replace the mounted page with the router's current view.
    fn mount_current(&mut self, now: I) {
        let view = self.router.current_view();
        self.focus = None;
        self.status_message = None;
        // Old page goes first so its timers never outlive it
        self.page = None;
        self.page = self
            .templates
            .get(&view)
            .map(|template| Page::mount(view, template, self.viewport, self.config.confirmation, now));
    }

    fn observe_viewport(&mut self, now: I) {
        if let Some(page) = self.page.as_mut() {
            page.observe_viewport(self.viewport, now);
        }
    }

    /// Earliest pending timer across the navbar and the page.
    pub fn next_deadline(&self) -> Option<I> {
        let page = self.page.as_ref().and_then(Page::next_deadline);
        match (self.navbar.next_deadline(), page) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// What the main area shows.
    pub fn screen(&self) -> Screen {
        match &self.not_found {
            Some(path) => Screen::NotFound { path: path.clone() },
            None => Screen::Page(self.router.current_view()),
        }
    }

    /// Site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Router with the confirmed route and history.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Mounted navbar.
    pub fn navbar(&self) -> &Navbar<I> {
        &self.navbar
    }

    /// Navbar state.
    pub fn nav(&self) -> &NavState {
        self.navbar.state()
    }

    /// Mounted page. `None` while the fallback is showing.
    pub fn page(&self) -> Option<&Page<I>> {
        self.page.as_ref()
    }

    /// Scroll listener registry.
    pub fn scroll_registry(&self) -> &ScrollRegistry {
        &self.scroll_registry
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Focused contact form field. `None` if no field has focus.
    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

fn render_if(changed: bool) -> Vec<AppAction> {
    if changed { vec![AppAction::Render] } else { vec![] }
}
