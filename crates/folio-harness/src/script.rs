//! Scripted input for the simulation driver.

use std::{collections::VecDeque, time::Duration};

use folio_app::AppEvent;

/// Event delivered at a fixed offset from the start of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedEvent {
    /// Offset from the start of the run.
    pub at: Duration,
    /// Event to deliver.
    pub event: AppEvent,
}

/// Ordered list of timed events.
///
/// Offsets never decrease: an event scheduled earlier than its predecessor
/// is delivered right after it.
#[derive(Debug, Clone, Default)]
pub struct Script {
    events: VecDeque<ScriptedEvent>,
    cursor: Duration,
}

impl Script {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` at `at` milliseconds after the start.
    #[must_use]
    pub fn at(mut self, millis: u64, event: AppEvent) -> Self {
        self.cursor = self.cursor.max(Duration::from_millis(millis));
        self.events.push_back(ScriptedEvent { at: self.cursor, event });
        self
    }

    /// Deliver `event` `millis` milliseconds after the previous event.
    #[must_use]
    pub fn after(mut self, millis: u64, event: AppEvent) -> Self {
        self.cursor += Duration::from_millis(millis);
        self.events.push_back(ScriptedEvent { at: self.cursor, event });
        self
    }

    /// Deliver `event` at the same instant as the previous event.
    #[must_use]
    pub fn then(self, event: AppEvent) -> Self {
        self.after(0, event)
    }

    /// Number of events left.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether every event was delivered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn peek_offset(&self) -> Option<Duration> {
        self.events.front().map(|e| e.at)
    }

    pub(crate) fn pop(&mut self) -> Option<ScriptedEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_accumulate_and_never_decrease() {
        let mut script = Script::new()
            .at(100, AppEvent::Tick)
            .after(50, AppEvent::ToggleMenu)
            .at(20, AppEvent::CloseMenu)
            .then(AppEvent::SubmitForm);

        let offsets: Vec<_> = std::iter::from_fn(|| script.pop()).map(|e| e.at.as_millis()).collect();
        assert_eq!(offsets, vec![100, 150, 150, 150]);
    }
}
