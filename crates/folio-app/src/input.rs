//! Host-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic simulation testing. Scrolling keys are not
/// listed: the host owns the scroll position and reports it as
/// [`crate::AppEvent::Scroll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (submit the contact form).
    Enter,
    /// Backspace key (delete last character of the focused field).
    Backspace,
    /// Tab key (cycle contact form fields).
    Tab,
    /// Escape key (close menu, leave field, quit).
    Esc,
    /// Left arrow key (history back).
    Left,
    /// Right arrow key (history forward).
    Right,
}
