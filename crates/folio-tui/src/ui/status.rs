//! Status bar
//!
//! Displays the current route, history availability, the transient status
//! message and key hints.

use folio_app::{App, Screen};
use folio_core::env::Timestamp;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const KEY_HINTS: &str = " 1-4 pages | m menu | \u{2190}\u{2192} history | \u{2191}\u{2193} scroll | Tab form | q quit";

/// Render the status bar.
pub fn render<I: Timestamp>(frame: &mut Frame, app: &App<I>, area: Rect) {
    let route = match app.screen() {
        Screen::Page(_) => {
            Span::styled(app.router().current_path().to_string(), Style::default().fg(Color::Green))
        },
        Screen::NotFound { path } => Span::styled(
            format!("{path} (not found)"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let history = format!(
        " {}{} ",
        if app.router().can_go_back() { "\u{2190}" } else { " " },
        if app.router().can_go_forward() { "\u{2192}" } else { " " },
    );

    let message = app
        .status_message()
        .map_or_else(|| Span::raw(""), |msg| Span::styled(format!("| {msg} "), Style::default().fg(Color::Yellow)));

    let status_line = Line::from(vec![
        Span::raw(" "),
        route,
        Span::raw(history),
        message,
        Span::styled(KEY_HINTS, Style::default().fg(Color::Gray)),
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
