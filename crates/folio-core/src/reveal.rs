//! Staggered reveal state machine.
//!
//! A [`RevealSequencer`] owns the timing of one group of children that fade
//! in one after another. It reacts to discrete triggers (mount, or
//! [`ViewportEvent`]s from an observer) and to timer ticks, and reports what
//! changed as [`RevealEvent`]s.
//!
//! # State Machine
//!
//! ```text
//! ┌────────┐  start   ┌───────────┐  last child due  ┌─────────┐
//! │ Hidden │─────────>│ Revealing │─────────────────>│ Visible │
//! └────────┘          └───────────┘                  └─────────┘
//!   ^   ^               │   ^  │ start (restart)      │     │
//!   │   │     reset     │   └──┘                      │     │
//!   │   └───────────────┴─────────────────────────────┘     │
//!   │                                                       │ conceal
//!   │   first child hidden   ┌────────────┐                 │
//!   └────────────────────────│ Concealing │<────────────────┘
//!                            └────────────┘
//! ```
//!
//! Child `i` becomes visible `delay_children + i * stagger_children` after the
//! run started, never earlier. Reset hides everything immediately and cancels
//! every pending child timer, so a stale timer cannot flip visibility after a
//! restart. Conceal is the staggered way out: visible children leave one by
//! one, last shown first.

use crate::{
    env::Timestamp,
    motion::{StaggerConfig, Variant, VariantState, VariantTable},
    timer::TimerQueue,
    viewport::{DEFAULT_VISIBILITY_THRESHOLD, ViewportEvent},
};

/// Stage of a reveal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealStage {
    /// Nothing shown.
    Hidden,
    /// Run in progress; some children may be visible.
    Revealing,
    /// Every child shown.
    Visible,
    /// Children leaving one by one; at least one still visible.
    Concealing,
}

impl RevealStage {
    /// Variant state the group container animates towards.
    pub fn variant_state(self) -> VariantState {
        match self {
            Self::Hidden => VariantState::Hidden,
            Self::Revealing | Self::Visible | Self::Concealing => VariantState::Visible,
        }
    }
}

/// What starts a reveal run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealTrigger {
    /// Run as soon as the group mounts.
    OnMount,
    /// Run whenever the tracked region enters the viewport; reset when it
    /// leaves.
    InView {
        /// Visible fraction required, in `[0.0, 1.0]`.
        threshold: f64,
    },
}

impl Default for RevealTrigger {
    fn default() -> Self {
        Self::InView { threshold: DEFAULT_VISIBILITY_THRESHOLD }
    }
}

/// Change reported by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// A new run started.
    Started {
        /// Run number, increasing with every start.
        epoch: u64,
    },
    /// A child became visible.
    ChildShown {
        /// Child index.
        index: usize,
    },
    /// Every child is visible.
    Completed,
    /// All children were hidden and pending timers cancelled.
    Reset,
    /// A child left during a conceal.
    ChildHidden {
        /// Child index.
        index: usize,
    },
    /// The last child left; the group is hidden.
    Concealed,
}

/// Observable reveal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealState {
    /// Current stage.
    pub stage: RevealStage,
    /// Number of visible children.
    pub visible_child_count: usize,
}

/// Drives one staggered group from hidden to visible.
///
/// Pure state machine: time is passed in, nothing sleeps. Generic over the
/// instant type so simulation can use a virtual clock.
#[derive(Debug, Clone)]
pub struct RevealSequencer<I> {
    stagger: StaggerConfig,
    child_count: usize,
    stage: RevealStage,
    visible: usize,
    epoch: u64,
    started_at: Option<I>,
    /// Pending child slots, keyed by due time.
    timers: TimerQueue<I, usize>,
    container: VariantTable,
    item: VariantTable,
}

impl<I: Timestamp> RevealSequencer<I> {
    /// Create a hidden group of `child_count` children.
    pub fn new(child_count: usize, stagger: StaggerConfig) -> Self {
        Self {
            stagger,
            child_count,
            stage: RevealStage::Hidden,
            visible: 0,
            epoch: 0,
            started_at: None,
            timers: TimerQueue::new(),
            container: VariantTable::container(stagger),
            item: VariantTable::item(),
        }
    }

    /// Replace the item variant table passed through to the renderer.
    #[must_use]
    pub fn with_item_variants(mut self, item: VariantTable) -> Self {
        self.item = item;
        self
    }

    /// Start a run at `now`, restarting from hidden if one was in progress.
    ///
    /// Children whose offset is zero become visible immediately.
    pub fn start(&mut self, now: I) -> Vec<RevealEvent> {
        let cancelled = self.timers.cancel_all();
        self.epoch += 1;
        self.visible = 0;
        self.started_at = Some(now);

        tracing::debug!(epoch = self.epoch, cancelled, children = self.child_count, "reveal started");

        let mut events = vec![RevealEvent::Started { epoch: self.epoch }];
        if self.child_count == 0 {
            self.stage = RevealStage::Visible;
            events.push(RevealEvent::Completed);
            return events;
        }

        self.stage = RevealStage::Revealing;
        for slot in 0..self.child_count {
            self.timers.schedule(now + self.stagger.offset(slot), slot);
        }

        events.extend(self.tick(now));
        events
    }

    /// Hide every child and cancel pending timers.
    ///
    /// Returns `None` if already hidden with nothing pending.
    pub fn reset(&mut self) -> Option<RevealEvent> {
        if self.stage == RevealStage::Hidden && self.timers.is_empty() {
            return None;
        }

        let cancelled = self.timers.cancel_all();
        self.stage = RevealStage::Hidden;
        self.visible = 0;
        self.started_at = None;

        tracing::debug!(epoch = self.epoch, cancelled, "reveal reset");
        Some(RevealEvent::Reset)
    }

    /// Hide the visible children one by one, starting with the last shown.
    ///
    /// The `k`-th child to leave goes `stagger.offset(k)` after `now`.
    /// Pending reveal timers are cancelled. With nothing visible this is a
    /// [`Self::reset`].
    pub fn conceal(&mut self, now: I, stagger: StaggerConfig) -> Vec<RevealEvent> {
        if self.visible == 0 {
            return self.reset().into_iter().collect();
        }

        let cancelled = self.timers.cancel_all();
        self.stage = RevealStage::Concealing;
        for k in 0..self.visible {
            self.timers.schedule(now + stagger.offset(k), self.visible - 1 - k);
        }

        tracing::debug!(epoch = self.epoch, cancelled, visible = self.visible, "reveal concealing");
        self.tick(now)
    }

    /// React to a visibility transition of the tracked region.
    pub fn handle_viewport(&mut self, event: ViewportEvent, now: I) -> Vec<RevealEvent> {
        match event {
            ViewportEvent::Entered => self.start(now),
            ViewportEvent::Left => self.reset().into_iter().collect(),
        }
    }

    /// Show (or, while concealing, hide) every child whose slot is due at
    /// `now`.
    pub fn tick(&mut self, now: I) -> Vec<RevealEvent> {
        let mut events = Vec::new();

        while let Some((_, slot)) = self.timers.pop_due(now) {
            if self.stage == RevealStage::Concealing {
                debug_assert_eq!(slot + 1, self.visible, "children leave last first");
                self.visible -= 1;
                events.push(RevealEvent::ChildHidden { index: slot });

                if self.visible == 0 {
                    self.stage = RevealStage::Hidden;
                    self.started_at = None;
                    tracing::debug!(epoch = self.epoch, "reveal concealed");
                    events.push(RevealEvent::Concealed);
                }
                continue;
            }

            debug_assert_eq!(slot, self.visible, "child slots fire in order");
            self.visible += 1;
            events.push(RevealEvent::ChildShown { index: slot });

            if self.visible == self.child_count {
                self.stage = RevealStage::Visible;
                tracing::debug!(epoch = self.epoch, "reveal completed");
                events.push(RevealEvent::Completed);
            }
        }

        events
    }

    /// Earliest pending child deadline. `None` when nothing is scheduled.
    pub fn next_deadline(&self) -> Option<I> {
        self.timers.next_deadline()
    }

    /// Current stage.
    pub fn stage(&self) -> RevealStage {
        self.stage
    }

    /// Number of visible children.
    pub fn visible_child_count(&self) -> usize {
        self.visible
    }

    /// Number of children in the group.
    pub fn child_count(&self) -> usize {
        self.child_count
    }

    /// Run number of the latest start. Zero if never started.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start time of the current run. `None` while hidden.
    pub fn started_at(&self) -> Option<I> {
        self.started_at
    }

    /// Stagger timing of the group.
    pub fn stagger(&self) -> StaggerConfig {
        self.stagger
    }

    /// Observable state.
    pub fn state(&self) -> RevealState {
        RevealState { stage: self.stage, visible_child_count: self.visible }
    }

    /// Whether child `index` is visible.
    pub fn is_child_visible(&self, index: usize) -> bool {
        index < self.visible
    }

    /// Variant the container should render with.
    pub fn container_variant(&self) -> &Variant {
        self.container.lookup(self.stage.variant_state())
    }

    /// Variant child `index` should render with.
    pub fn child_variant(&self, index: usize) -> &Variant {
        let state =
            if self.is_child_visible(index) { VariantState::Visible } else { VariantState::Hidden };
        self.item.lookup(state)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::motion::{HERO_STAGGER, MENU_CLOSE_STAGGER, MENU_STAGGER};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn children_appear_on_their_slots() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(3, HERO_STAGGER);

        assert_eq!(seq.start(t0), vec![RevealEvent::Started { epoch: 1 }]);
        assert_eq!(seq.stage(), RevealStage::Revealing);
        assert_eq!(seq.next_deadline(), Some(t0 + ms(300)));

        assert!(seq.tick(t0 + ms(299)).is_empty());
        assert_eq!(seq.tick(t0 + ms(300)), vec![RevealEvent::ChildShown { index: 0 }]);
        assert_eq!(seq.tick(t0 + ms(699)), vec![RevealEvent::ChildShown { index: 1 }]);
        assert_eq!(seq.tick(t0 + ms(700)), vec![
            RevealEvent::ChildShown { index: 2 },
            RevealEvent::Completed
        ]);
        assert_eq!(seq.stage(), RevealStage::Visible);
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn late_tick_catches_up_in_order() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(2, HERO_STAGGER);
        seq.start(t0);

        assert_eq!(seq.tick(t0 + ms(5000)), vec![
            RevealEvent::ChildShown { index: 0 },
            RevealEvent::ChildShown { index: 1 },
            RevealEvent::Completed
        ]);
    }

    #[test]
    fn zero_offset_child_shows_immediately() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(2, MENU_STAGGER);

        assert_eq!(seq.start(t0), vec![
            RevealEvent::Started { epoch: 1 },
            RevealEvent::ChildShown { index: 0 }
        ]);
        assert_eq!(seq.visible_child_count(), 1);
    }

    #[test]
    fn empty_group_completes_on_start() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::<Instant>::new(0, HERO_STAGGER);

        assert_eq!(seq.start(t0), vec![RevealEvent::Started { epoch: 1 }, RevealEvent::Completed]);
        assert_eq!(seq.stage(), RevealStage::Visible);
    }

    #[test]
    fn leaving_viewport_hides_immediately() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(3, HERO_STAGGER);
        seq.handle_viewport(ViewportEvent::Entered, t0);
        seq.tick(t0 + ms(499));
        assert_eq!(seq.visible_child_count(), 1);

        // Slot 1 is due at exactly 500ms
        seq.tick(t0 + ms(500));
        assert_eq!(seq.visible_child_count(), 2);

        assert_eq!(seq.handle_viewport(ViewportEvent::Left, t0 + ms(510)), vec![RevealEvent::Reset]);
        assert_eq!(seq.state(), RevealState { stage: RevealStage::Hidden, visible_child_count: 0 });
        assert_eq!(seq.next_deadline(), None);

        // Cancelled timers never fire
        assert!(seq.tick(t0 + ms(10_000)).is_empty());
    }

    #[test]
    fn reset_when_hidden_is_noop() {
        let mut seq = RevealSequencer::<Instant>::new(3, HERO_STAGGER);
        assert_eq!(seq.reset(), None);
    }

    #[test]
    fn reentry_restarts_from_hidden() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(3, HERO_STAGGER);
        seq.start(t0);
        seq.tick(t0 + ms(300));

        let t1 = t0 + ms(400);
        seq.handle_viewport(ViewportEvent::Left, t1);
        assert_eq!(seq.handle_viewport(ViewportEvent::Entered, t1), vec![RevealEvent::Started {
            epoch: 2
        }]);

        // Old run's slot 1 (t0 + 500ms) must not fire
        assert!(seq.tick(t0 + ms(500)).is_empty());
        assert_eq!(seq.tick(t1 + ms(300)), vec![RevealEvent::ChildShown { index: 0 }]);
    }

    #[test]
    fn variants_follow_visibility() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(2, HERO_STAGGER);
        assert!(!seq.container_variant().is_visible());

        seq.start(t0);
        seq.tick(t0 + ms(300));
        assert!(seq.container_variant().is_visible());
        assert!(seq.child_variant(0).is_visible());
        assert!(!seq.child_variant(1).is_visible());
    }

    #[test]
    fn conceal_hides_last_shown_first() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(3, MENU_STAGGER);
        seq.start(t0);
        seq.tick(t0 + ms(200));
        assert_eq!(seq.stage(), RevealStage::Visible);

        let t1 = t0 + ms(1000);
        assert_eq!(seq.conceal(t1, MENU_CLOSE_STAGGER), vec![RevealEvent::ChildHidden { index: 2 }]);
        assert_eq!(seq.stage(), RevealStage::Concealing);
        assert!(seq.is_child_visible(1));
        assert!(seq.container_variant().is_visible());
        assert_eq!(seq.next_deadline(), Some(t1 + ms(50)));

        assert_eq!(seq.tick(t1 + ms(50)), vec![RevealEvent::ChildHidden { index: 1 }]);
        assert_eq!(seq.tick(t1 + ms(100)), vec![
            RevealEvent::ChildHidden { index: 0 },
            RevealEvent::Concealed
        ]);
        assert_eq!(seq.state(), RevealState { stage: RevealStage::Hidden, visible_child_count: 0 });
        assert_eq!(seq.started_at(), None);
        assert!(!seq.container_variant().is_visible());
    }

    #[test]
    fn conceal_cancels_pending_reveal() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(4, MENU_STAGGER);
        seq.start(t0);
        seq.tick(t0 + ms(100));
        assert_eq!(seq.visible_child_count(), 2);

        seq.conceal(t0 + ms(120), MENU_CLOSE_STAGGER);
        // Slot 2 of the opening run (t0 + 200ms) never shows
        let events = seq.tick(t0 + ms(200));
        assert!(events.iter().all(|e| !matches!(e, RevealEvent::ChildShown { .. })));
        assert_eq!(seq.stage(), RevealStage::Hidden);
    }

    #[test]
    fn conceal_with_nothing_visible_resets() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(3, HERO_STAGGER);
        assert!(seq.conceal(t0, MENU_CLOSE_STAGGER).is_empty());

        seq.start(t0);
        assert_eq!(seq.conceal(t0, MENU_CLOSE_STAGGER), vec![RevealEvent::Reset]);
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn restart_while_concealing() {
        let t0 = Instant::now();
        let mut seq = RevealSequencer::new(2, MENU_STAGGER);
        seq.start(t0);
        seq.tick(t0 + ms(100));
        seq.conceal(t0 + ms(200), MENU_CLOSE_STAGGER);

        assert_eq!(seq.start(t0 + ms(210)), vec![
            RevealEvent::Started { epoch: 2 },
            RevealEvent::ChildShown { index: 0 }
        ]);
        assert_eq!(seq.stage(), RevealStage::Revealing);
    }
}
