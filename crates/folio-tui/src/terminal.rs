//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard and mouse events and ratatui for rendering.
//!
//! The terminal plays the browser's part: it owns the scroll position, measures
//! the page after every draw and reports what changed (body height, clamped
//! scroll offset, tracked region) back to the app as events.

use std::{
    collections::VecDeque,
    io::{self, Stdout, stdout},
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_app::{App, AppEvent, Driver, KeyInput};
use folio_core::{router::ViewId, viewport::Region};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui::{self, CHROME_HEIGHT, FrameLayout};

/// Rows moved by one mouse wheel notch.
const WHEEL_STEP: u32 = 3;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal input stream ended.
    #[error("terminal input closed")]
    InputClosed,
}

/// Scroll position of the page body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: u32,
    max: u32,
}

impl ScrollState {
    /// Current offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Move to `offset`, clamped. Returns the new offset if it moved.
    pub fn set(&mut self, offset: u32) -> Option<u32> {
        let clamped = offset.min(self.max);
        (clamped != std::mem::replace(&mut self.offset, clamped)).then_some(clamped)
    }

    /// Move by `delta` rows. Returns the new offset if it moved.
    pub fn scroll_by(&mut self, delta: i64) -> Option<u32> {
        let target = i64::from(self.offset).saturating_add(delta).clamp(0, i64::from(u32::MAX));
        self.set(u32::try_from(target).unwrap_or(u32::MAX))
    }

    /// Adopt a new maximum. Returns the new offset if clamping moved it.
    pub fn set_max(&mut self, max: u32) -> Option<u32> {
        self.max = max;
        self.set(self.offset)
    }
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm) and rendering (ratatui). Owns the
/// scroll position and the last frame's layout for hit-testing.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    tick: Duration,
    scroll: ScrollState,
    layout: FrameLayout,
    measured: Option<(Option<ViewId>, Option<Region>)>,
    body_height: Option<u32>,
    on_card: bool,
    pending: VecDeque<AppEvent>,
    restored: bool,
}

impl TerminalDriver {
    /// Create a new terminal driver that redraws at least every `tick`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot enter raw mode or the
    /// alternate screen.
    pub fn new(tick: Duration) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self {
            terminal,
            event_stream,
            tick,
            scroll: ScrollState::default(),
            layout: FrameLayout::default(),
            measured: None,
            body_height: None,
            on_card: false,
            pending: VecDeque::new(),
            restored: false,
        })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            _ => None,
        }
    }

    fn scroll_event(offset: Option<u32>) -> Option<AppEvent> {
        offset.map(|offset| AppEvent::Scroll { offset })
    }

    /// Scrolling keys stay with the terminal; the rest go to the app.
    fn on_key(&mut self, key: KeyEvent) -> Option<AppEvent> {
        let page = i64::from(self.layout.viewport_height.max(1));
        match key.code {
            KeyCode::Up => Self::scroll_event(self.scroll.scroll_by(-1)),
            KeyCode::Down => Self::scroll_event(self.scroll.scroll_by(1)),
            KeyCode::PageUp => Self::scroll_event(self.scroll.scroll_by(-page)),
            KeyCode::PageDown => Self::scroll_event(self.scroll.scroll_by(page)),
            KeyCode::Home => Self::scroll_event(self.scroll.set(0)),
            KeyCode::End => Self::scroll_event(self.scroll.set(u32::MAX)),
            code => Self::convert_key(code).map(AppEvent::Key),
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> Option<AppEvent> {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved => {
                let on_card = self.layout.is_on_card(column, row);
                (on_card != std::mem::replace(&mut self.on_card, on_card))
                    .then_some(AppEvent::HeroCardHover { hovered: on_card })
            },
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(path) = self.layout.link_at(column, row) {
                    Some(AppEvent::Navigate { path: path.to_string() })
                } else if self.layout.is_on_menu_button(column, row) {
                    Some(AppEvent::ToggleMenu)
                } else if self.layout.menu_open {
                    Some(AppEvent::CloseMenu)
                } else {
                    None
                }
            },
            MouseEventKind::ScrollUp => Self::scroll_event(self.scroll.scroll_by(-i64::from(WHEEL_STEP))),
            MouseEventKind::ScrollDown => Self::scroll_event(self.scroll.scroll_by(i64::from(WHEEL_STEP))),
            _ => None,
        }
    }

    fn translate(&mut self, event: Event) -> Option<AppEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            Event::Resize(_, rows) => {
                let height = u32::from(rows.saturating_sub(CHROME_HEIGHT));
                self.body_height = Some(height);
                Some(AppEvent::Resize { height })
            },
            _ => None,
        }
    }

    /// Queue what the last draw measured, as the app needs to hear it.
    fn after_render(&mut self, layout: FrameLayout) {
        if self.body_height != Some(layout.viewport_height) {
            self.body_height = Some(layout.viewport_height);
            self.pending.push_back(AppEvent::Resize { height: layout.viewport_height });
        }

        if let Some(offset) = self.scroll.set_max(layout.max_scroll()) {
            self.pending.push_back(AppEvent::Scroll { offset });
        }

        let measured = (layout.view, layout.tracked);
        if self.measured != Some(measured) {
            if self.measured.is_some_and(|(view, _)| view != layout.view) {
                self.on_card = false;
            }
            self.measured = Some(measured);
            self.pending.push_back(AppEvent::Layout { region: layout.tracked });
        }

        self.layout = layout;
    }

    fn restore(&mut self) {
        if std::mem::replace(&mut self.restored, true) {
            return;
        }
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = self.terminal.show_cursor();
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<AppEvent>, Self::Error> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }

        let wait = timeout.map_or(self.tick, |timeout| timeout.min(self.tick));

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => Ok(self.translate(event)),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    None => Err(TerminalError::InputClosed),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(wait) => Ok(None),
        }
    }

    fn render(&mut self, app: &App<Self::Instant>) -> Result<(), Self::Error> {
        let offset = self.scroll.offset();
        let mut layout = FrameLayout::default();
        self.terminal.draw(|frame| {
            layout = ui::render(frame, app, offset);
        })?;
        self.after_render(layout);
        Ok(())
    }

    fn scroll_to(&mut self, offset: u32) {
        self.scroll.set(offset);
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_clamps_to_document() {
        let mut scroll = ScrollState::default();
        assert_eq!(scroll.scroll_by(5), None);

        assert_eq!(scroll.set_max(20), None);
        assert_eq!(scroll.scroll_by(5), Some(5));
        assert_eq!(scroll.scroll_by(-10), Some(0));
        assert_eq!(scroll.set(u32::MAX), Some(20));
        assert_eq!(scroll.scroll_by(1), None);

        // Shorter document pulls the offset back
        assert_eq!(scroll.set_max(8), Some(8));
        assert_eq!(scroll.offset(), 8);
    }

    #[test]
    fn scrolling_keys_are_not_forwarded() {
        assert_eq!(TerminalDriver::convert_key(KeyCode::Up), None);
        assert_eq!(TerminalDriver::convert_key(KeyCode::PageDown), None);
        assert_eq!(TerminalDriver::convert_key(KeyCode::Char('q')), Some(KeyInput::Char('q')));
        assert_eq!(TerminalDriver::convert_key(KeyCode::Esc), Some(KeyInput::Esc));
    }
}
