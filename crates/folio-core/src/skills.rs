//! Growing skill bars.
//!
//! Each bar starts at its stagger slot and grows from zero to its level over
//! the tween of its item variant. A [`RevealSequencer`] decides when each bar
//! starts. Growth in between is sampled every [`GROWTH_FRAME`], so a host
//! without its own animation clock still redraws while a bar is moving.

use std::time::Duration;

use crate::{
    env::Timestamp,
    motion::{SKILL_STAGGER, Transition, VariantTable},
    reveal::RevealSequencer,
};

/// Redraw interval while any bar is growing.
pub const GROWTH_FRAME: Duration = Duration::from_millis(50);

/// A group of skill bars growing one after another.
#[derive(Debug, Clone)]
pub struct SkillMeters<I> {
    bars: RevealSequencer<I>,
    /// Time of the latest start or tick. `None` until started.
    sampled_at: Option<I>,
}

impl<I: Timestamp> SkillMeters<I> {
    /// Create `count` empty bars.
    pub fn new(count: usize) -> Self {
        Self {
            bars: RevealSequencer::new(count, SKILL_STAGGER).with_item_variants(VariantTable::skill_bar()),
            sampled_at: None,
        }
    }

    /// Start growing every bar from zero at `now`.
    pub fn start(&mut self, now: I) {
        self.bars.start(now);
        self.sampled_at = Some(now);
    }

    /// Advance to `now`. Returns true if any bar moved.
    pub fn tick(&mut self, now: I) -> bool {
        if self.sampled_at.is_none() {
            return false;
        }

        let before = self.fills();
        self.bars.tick(now);
        self.sampled_at = Some(now);
        before != self.fills()
    }

    fn fills(&self) -> Vec<f64> {
        (0..self.count()).map(|index| self.progress(index)).collect()
    }

    /// Number of bars.
    pub fn count(&self) -> usize {
        self.bars.child_count()
    }

    /// Fraction of its level bar `index` has reached, in `[0.0, 1.0]`.
    pub fn progress(&self, index: usize) -> f64 {
        let (Some(started), Some(now)) = (self.bars.started_at(), self.sampled_at) else {
            return 0.0;
        };
        if !self.bars.is_child_visible(index) {
            return 0.0;
        }

        let Transition::Tween { duration, delay } = self.bars.child_variant(index).transition else {
            return 1.0;
        };
        let begin = started + self.bars.stagger().offset(index) + delay;
        if now <= begin {
            return 0.0;
        }
        if duration.is_zero() {
            return 1.0;
        }
        ((now - begin).as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }

    /// Whether a started bar has not reached its level yet.
    pub fn is_growing(&self) -> bool {
        (0..self.count()).any(|index| self.bars.is_child_visible(index) && self.progress(index) < 1.0)
    }

    /// Whether every bar reached its level.
    pub fn is_complete(&self) -> bool {
        (0..self.count()).all(|index| self.progress(index) >= 1.0)
    }

    /// Next bar start, or the next growth frame while a bar is moving.
    pub fn next_deadline(&self) -> Option<I> {
        let frame = self.sampled_at.filter(|_| self.is_growing()).map(|at| at + GROWTH_FRAME);
        [self.bars.next_deadline(), frame].into_iter().flatten().min()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn idle_until_started() {
        let mut meters = SkillMeters::<Instant>::new(4);
        assert!(!meters.tick(Instant::now()));
        assert!(close(meters.progress(0), 0.0));
        assert_eq!(meters.next_deadline(), None);
    }

    #[test]
    fn bars_start_on_their_slots() {
        let t0 = Instant::now();
        let mut meters = SkillMeters::new(4);
        meters.start(t0);

        assert_eq!(meters.next_deadline(), Some(t0 + GROWTH_FRAME));
        assert!(meters.tick(t0 + ms(750)));

        assert!(close(meters.progress(0), 0.5));
        // Bar 1 started at 200ms
        assert!(close(meters.progress(1), 550.0 / 1500.0));
        assert!(close(meters.progress(3), 150.0 / 1500.0));
    }

    #[test]
    fn later_bars_wait_for_their_slot() {
        let t0 = Instant::now();
        let mut meters = SkillMeters::new(2);
        meters.start(t0);
        meters.tick(t0 + ms(199));

        assert!(close(meters.progress(1), 0.0));
        assert!(meters.tick(t0 + ms(400)));
        assert!(meters.progress(1) > 0.0);
    }

    #[test]
    fn growth_stops_at_full_level() {
        let t0 = Instant::now();
        let mut meters = SkillMeters::new(4);
        meters.start(t0);

        // Last bar starts at 600ms and takes 1.5s
        meters.tick(t0 + ms(2099));
        assert!(meters.is_growing());
        assert_eq!(meters.next_deadline(), Some(t0 + ms(2099) + GROWTH_FRAME));

        assert!(meters.tick(t0 + ms(2100)));
        assert!(meters.is_complete());
        assert!(!meters.is_growing());
        assert_eq!(meters.next_deadline(), None);
        assert!(!meters.tick(t0 + ms(5000)));
    }
}
