//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the App at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks, and the simulation driver keeps one per
//! rendered frame for timing assertions.

use folio_app::{App, Screen};
use folio_core::{
    contact::Field,
    env::Timestamp,
    reveal::{RevealSequencer, RevealStage},
    router::ViewId,
};

/// Snapshot of one reveal sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSnapshot {
    /// Current stage.
    pub stage: RevealStage,
    /// Visible children.
    pub visible: usize,
    /// Total children.
    pub children: usize,
    /// Run number.
    pub epoch: u64,
}

impl RevealSnapshot {
    /// Capture a sequencer.
    pub fn of<I: Timestamp>(seq: &RevealSequencer<I>) -> Self {
        Self {
            stage: seq.stage(),
            visible: seq.visible_child_count(),
            children: seq.child_count(),
            epoch: seq.epoch(),
        }
    }
}

/// Snapshot of the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Name, email and message, in form order.
    pub fields: [String; 3],
    /// Whether the confirmation is showing.
    pub submitted: bool,
}

impl FormSnapshot {
    /// Value of `field`.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.fields[0],
            Field::Email => &self.fields[1],
            Field::Message => &self.fields[2],
        }
    }

    /// Whether every field is empty.
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(String::is_empty)
    }
}

/// Snapshot of the whole App.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSnapshot {
    /// What the main area shows.
    pub screen: Screen,
    /// Router's confirmed path.
    pub router_path: String,
    /// Navbar's active link.
    pub active_path: String,
    /// Mobile menu flag.
    pub menu_open: bool,
    /// Mobile menu link reveal.
    pub menu: RevealSnapshot,
    /// Navbar background flag.
    pub scrolled: bool,
    /// Viewport scroll offset.
    pub scroll_offset: u32,
    /// Registered scroll listener keys.
    pub listeners: Vec<String>,
    /// Whether the navbar still holds its listener.
    pub navbar_listening: bool,
    /// Mounted page view. `None` while the fallback shows.
    pub page_view: Option<ViewId>,
    /// Mounted page reveal. `None` while the fallback shows.
    pub page_reveal: Option<RevealSnapshot>,
    /// Hero card hover flag. `None` off the home page.
    pub hero_hovered: Option<bool>,
    /// Whether every skill bar is full. `None` off the about page.
    pub skills_complete: Option<bool>,
    /// Contact form. `None` off the contact page.
    pub form: Option<FormSnapshot>,
    /// Transient status message.
    pub status: Option<String>,
}

impl SystemSnapshot {
    /// Capture observable App state.
    pub fn from_app<I: Timestamp>(app: &App<I>) -> Self {
        let page = app.page();
        Self {
            screen: app.screen(),
            router_path: app.router().current_path().to_string(),
            active_path: app.nav().active_path().to_string(),
            menu_open: app.nav().mobile_menu_open(),
            menu: RevealSnapshot::of(app.navbar().menu()),
            scrolled: app.nav().scrolled(),
            scroll_offset: app.viewport().scroll_offset,
            listeners: app.scroll_registry().keys(),
            navbar_listening: app.navbar().subscription().is_live(),
            page_view: page.map(folio_app::Page::view),
            page_reveal: page.map(|p| RevealSnapshot::of(p.reveal())),
            hero_hovered: page.and_then(|p| p.hover()).map(|card| card.hovered()),
            skills_complete: page.and_then(|p| p.skills()).map(|skills| skills.is_complete()),
            form: page.and_then(|p| p.form()).map(|form| FormSnapshot {
                fields: Field::ALL.map(|f| form.field(f).to_string()),
                submitted: form.is_submitted(),
            }),
            status: app.status_message().map(str::to_string),
        }
    }

    /// Visible children of the mounted page. Zero while the fallback shows.
    pub fn visible_children(&self) -> usize {
        self.page_reveal.map_or(0, |r| r.visible)
    }
}
