//! Navbar and mobile menu
//!
//! Draws the brand, the route links and the menu button, and records where
//! each clickable target landed so the driver can hit-test mouse clicks.

use folio_app::App;
use folio_core::env::Timestamp;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use super::LinkTarget;
use crate::content::BRAND;

/// Narrowest navbar that fits every link inline.
const INLINE_LINKS_MIN_WIDTH: u16 = 60;

const MENU_BUTTON: &str = "[m] Menu";
const MENU_WIDTH: u16 = 20;
const LINK_GAP: u16 = 2;

/// Clickable areas produced by the navbar.
#[derive(Debug, Default)]
pub struct NavbarLayout {
    /// Route links, inline or in the open menu.
    pub links: Vec<LinkTarget>,
    /// Menu toggle, shown on narrow terminals.
    pub menu_button: Option<Rect>,
}

fn width_of(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

fn link_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Route labels in table order, numbered for their shortcut keys.
fn labels<I: Timestamp>(app: &App<I>) -> Vec<(String, String)> {
    app.router()
        .table()
        .iter()
        .enumerate()
        .map(|(index, route)| (format!("{} {}", index + 1, route.view.title()), route.path.clone()))
        .collect()
}

/// Render the navbar bar into `area`.
pub fn render<I: Timestamp>(frame: &mut Frame, app: &App<I>, area: Rect) -> NavbarLayout {
    let nav = app.nav();
    let mut layout = NavbarLayout::default();

    let border = if nav.scrolled() {
        Style::default().fg(Color::Cyan).bg(Color::Black)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let brand = format!(" {BRAND} ");
    let mut spans = vec![Span::styled(brand.clone(), Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))];
    let mut x = inner.x.saturating_add(width_of(&brand) + LINK_GAP);
    spans.push(Span::raw(" ".repeat(usize::from(LINK_GAP))));

    if area.width >= INLINE_LINKS_MIN_WIDTH {
        for (label, path) in labels(app) {
            let width = width_of(&label);
            layout.links.push(LinkTarget { area: Rect::new(x, inner.y, width, 1), path: path.clone() });
            spans.push(Span::styled(label, link_style(nav.is_active(&path))));
            spans.push(Span::raw(" ".repeat(usize::from(LINK_GAP))));
            x = x.saturating_add(width + LINK_GAP);
        }
    } else {
        let width = width_of(MENU_BUTTON);
        let button_x = inner.right().saturating_sub(width);
        layout.menu_button = Some(Rect::new(button_x, inner.y, width, 1));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    if let Some(button) = layout.menu_button {
        let style = if nav.mobile_menu_open() {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Yellow)
        };
        frame.render_widget(Paragraph::new(Span::styled(MENU_BUTTON, style)), button);
    }

    layout
}

/// Render the menu as an overlay below the navbar.
///
/// Links appear one by one as the menu's stagger reveals them and leave last
/// first once it closes. Only shown links of an open menu are clickable.
pub fn render_menu<I: Timestamp>(frame: &mut Frame, app: &App<I>, below: Rect, bounds: Rect) -> Vec<LinkTarget> {
    let labels = labels(app);
    let height = u16::try_from(labels.len()).unwrap_or(u16::MAX).saturating_add(2).min(bounds.height);
    let width = MENU_WIDTH.min(bounds.width);
    let area = Rect::new(bounds.right().saturating_sub(width), below.bottom(), width, height);

    let menu = app.navbar().menu();
    let open = app.nav().mobile_menu_open();
    let mut targets = Vec::new();
    let items: Vec<ListItem> = labels
        .into_iter()
        .enumerate()
        .map(|(index, (label, path))| {
            if !menu.child_variant(index).is_visible() {
                return ListItem::new(Line::default());
            }

            let row = area.y.saturating_add(1).saturating_add(u16::try_from(index).unwrap_or(u16::MAX));
            if open && row < area.bottom().saturating_sub(1) {
                targets.push(LinkTarget {
                    area: Rect::new(area.x.saturating_add(1), row, area.width.saturating_sub(2), 1),
                    path: path.clone(),
                });
            }
            ListItem::new(Line::from(Span::styled(format!(" {label}"), link_style(app.nav().is_active(&path)))))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Menu ").border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(Clear, area);
    frame.render_widget(List::new(items).block(block), area);

    targets
}
