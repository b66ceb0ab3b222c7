//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O): they draw a frame and
//! report a [`FrameLayout`] describing where the interactive parts ended up,
//! which the terminal driver uses for scrolling and mouse hit-testing.

mod navbar;
pub mod pages;
mod status;

use folio_app::{App, Screen};
use folio_core::{env::Timestamp, router::ViewId, viewport::Region};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
};

/// Navbar height, borders included.
pub const NAVBAR_HEIGHT: u16 = 3;

/// Status bar height.
pub const STATUS_HEIGHT: u16 = 1;

/// Rows not available to the page body.
pub const CHROME_HEIGHT: u16 = NAVBAR_HEIGHT + STATUS_HEIGHT;

/// A clickable route link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Screen area of the link.
    pub area: Rect,
    /// Path the link navigates to.
    pub path: String,
}

/// Where the interactive parts of a frame were drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    /// Mounted view. `None` on the fallback page.
    pub view: Option<ViewId>,
    /// Rows available to the page body.
    pub viewport_height: u32,
    /// Total rows of the page body.
    pub document_height: u32,
    /// Block whose visibility drives the page reveal, in document rows.
    pub tracked: Option<Region>,
    /// Visible part of the hero card, in screen cells.
    pub hero_card: Option<Rect>,
    /// Clickable route links.
    pub links: Vec<LinkTarget>,
    /// Menu toggle button.
    pub menu_button: Option<Rect>,
    /// Whether the mobile menu was drawn open.
    pub menu_open: bool,
}

impl FrameLayout {
    /// Largest scroll offset that still fills the body.
    pub fn max_scroll(&self) -> u32 {
        self.document_height.saturating_sub(self.viewport_height)
    }

    /// Path of the link under the cell, if any.
    pub fn link_at(&self, column: u16, row: u16) -> Option<&str> {
        self.links.iter().find(|link| hit(link.area, column, row)).map(|link| link.path.as_str())
    }

    /// Whether the cell lies on the hero card.
    pub fn is_on_card(&self, column: u16, row: u16) -> bool {
        self.hero_card.is_some_and(|card| hit(card, column, row))
    }

    /// Whether the cell lies on the menu button.
    pub fn is_on_menu_button(&self, column: u16, row: u16) -> bool {
        self.menu_button.is_some_and(|button| hit(button, column, row))
    }
}

/// Whether the cell at `column`, `row` lies inside `rect`.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Map document rows of `region` to the screen, clipped to the body area.
fn on_screen(region: Region, body: Rect, scroll_offset: u32) -> Option<(u16, u16)> {
    let first = region.top.max(scroll_offset);
    let last = region.bottom().min(scroll_offset.saturating_add(u32::from(body.height)));
    if first >= last {
        return None;
    }

    let y = u16::try_from(first - scroll_offset).ok()?.checked_add(body.y)?;
    let height = u16::try_from(last - first).ok()?;
    Some((y, height))
}

/// Render the entire UI with the body scrolled to `scroll_offset`.
pub fn render<I: Timestamp>(frame: &mut Frame, app: &App<I>, scroll_offset: u32) -> FrameLayout {
    const BODY_MIN_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAVBAR_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [navbar_area, body_area, status_area] = chunks.as_ref() else {
        return FrameLayout::default();
    };

    let document = match app.screen() {
        Screen::Page(_) => app.page().map(|page| pages::page(page, app.focus())).unwrap_or_default(),
        Screen::NotFound { path } => pages::not_found(&path),
    };

    let mut layout = FrameLayout {
        view: app.page().map(folio_app::Page::view),
        viewport_height: u32::from(body_area.height),
        document_height: document.height(),
        tracked: document.tracked,
        ..FrameLayout::default()
    };

    layout.hero_card = document.card.and_then(|card| on_screen(card, *body_area, scroll_offset)).map(|(y, height)| {
        Rect::new(body_area.x.saturating_add(pages::CARD_INDENT), y, pages::CARD_WIDTH, height)
            .intersection(*body_area)
    });

    let scroll = u16::try_from(scroll_offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(document.lines).scroll((scroll, 0)), *body_area);

    let navbar = navbar::render(frame, app, *navbar_area);
    layout.links = navbar.links;
    layout.menu_button = navbar.menu_button;

    // Stays drawn while the links leave
    layout.menu_open = app.nav().mobile_menu_open();
    if app.navbar().menu().container_variant().is_visible() {
        layout.links.extend(navbar::render_menu(frame, app, *navbar_area, *body_area));
    }

    status::render(frame, app, *status_area);
    layout
}
