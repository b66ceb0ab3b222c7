//! Animation variants as data.
//!
//! Every animated element has a small table of named states, each mapped to a
//! [`Variant`] parameter record. The state machines in this crate only decide
//! which state an element is in and when; interpolating between variants
//! (springs, tweens) is the renderer's job, so easing parameters pass through
//! untouched.

use std::time::Duration;

/// Spring easing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Spring stiffness.
    pub stiffness: f32,
    /// Damping coefficient.
    pub damping: f32,
}

/// Spring used by page items and the hero card.
pub const ITEM_SPRING: SpringParams = SpringParams { stiffness: 100.0, damping: 10.0 };

/// Tween duration used when none is given.
pub const DEFAULT_TWEEN: Duration = Duration::from_millis(300);

/// Child timing of a staggered group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaggerConfig {
    /// Delay before the first child starts.
    pub delay_children: Duration,
    /// Additional delay per child slot.
    pub stagger_children: Duration,
}

impl StaggerConfig {
    /// Create a stagger configuration.
    pub const fn new(delay_children: Duration, stagger_children: Duration) -> Self {
        Self { delay_children, stagger_children }
    }

    /// Offset from sequence start at which `slot` becomes visible.
    pub fn offset(&self, slot: usize) -> Duration {
        let slot = u32::try_from(slot).unwrap_or(u32::MAX);
        self.delay_children.saturating_add(self.stagger_children.saturating_mul(slot))
    }
}

/// Hero page: 0.3s delay, 0.2s between children.
pub const HERO_STAGGER: StaggerConfig =
    StaggerConfig::new(Duration::from_millis(300), Duration::from_millis(200));

/// About, Contact and Location pages: 0.3s delay, 0.1s between children.
pub const PAGE_STAGGER: StaggerConfig =
    StaggerConfig::new(Duration::from_millis(300), Duration::from_millis(100));

/// Mobile menu links: no delay, 0.1s between links.
pub const MENU_STAGGER: StaggerConfig =
    StaggerConfig::new(Duration::ZERO, Duration::from_millis(100));

/// Mobile menu links leaving: no delay, 0.05s between links, last link first.
pub const MENU_CLOSE_STAGGER: StaggerConfig =
    StaggerConfig::new(Duration::ZERO, Duration::from_millis(50));

/// About page skill bars: each starts growing 0.2s after the previous one.
pub const SKILL_STAGGER: StaggerConfig = StaggerConfig::new(Duration::ZERO, Duration::from_millis(200));

/// Time a skill bar takes to grow to its level.
pub const SKILL_FILL: Duration = Duration::from_millis(1500);

/// How a variant is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Jump without animation.
    Instant,
    /// Physically simulated spring.
    Spring(SpringParams),
    /// Orchestrates children with stagger timing.
    Stagger(StaggerConfig),
    /// Fixed-duration tween.
    Tween {
        /// Tween length.
        duration: Duration,
        /// Delay before the tween starts.
        delay: Duration,
    },
}

/// Target visual parameters for one named state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variant {
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f32,
    /// Horizontal offset.
    pub offset_x: f32,
    /// Vertical offset.
    pub offset_y: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Transition used to reach this variant.
    pub transition: Transition,
}

impl Variant {
    /// Fully opaque, untransformed, reached instantly.
    pub const IDENTITY: Self =
        Self { opacity: 1.0, offset_x: 0.0, offset_y: 0.0, scale: 1.0, transition: Transition::Instant };

    /// Same variant with a different opacity.
    #[must_use]
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Same variant with a different offset.
    #[must_use]
    pub const fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Same variant with a different scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Same variant with a different transition.
    #[must_use]
    pub const fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    /// Whether an element in this variant can be seen at all.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Named animation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantState {
    /// Initial, not yet revealed.
    Hidden,
    /// Revealed.
    Visible,
}

/// Lookup table from [`VariantState`] to [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantTable {
    /// Parameters for [`VariantState::Hidden`].
    pub hidden: Variant,
    /// Parameters for [`VariantState::Visible`].
    pub visible: Variant,
}

impl VariantTable {
    /// Parameters for `state`.
    pub fn lookup(&self, state: VariantState) -> &Variant {
        match state {
            VariantState::Hidden => &self.hidden,
            VariantState::Visible => &self.visible,
        }
    }

    /// Container of a staggered group: fades in and orchestrates children.
    pub fn container(stagger: StaggerConfig) -> Self {
        Self {
            hidden: Variant::IDENTITY.with_opacity(0.0),
            visible: Variant::IDENTITY.with_transition(Transition::Stagger(stagger)),
        }
    }

    /// Page item: rises 20 units while fading in on a spring.
    pub fn item() -> Self {
        Self {
            hidden: Variant::IDENTITY.with_opacity(0.0).with_offset(0.0, 20.0),
            visible: Variant::IDENTITY.with_transition(Transition::Spring(ITEM_SPRING)),
        }
    }

    /// Mobile menu link: drops 20 units while fading in.
    pub fn menu_item() -> Self {
        Self {
            hidden: Variant::IDENTITY.with_opacity(0.0).with_offset(0.0, -20.0),
            visible: Variant::IDENTITY
                .with_transition(Transition::Tween { duration: DEFAULT_TWEEN, delay: Duration::ZERO }),
        }
    }

    /// Skill bar: grows from zero width over [`SKILL_FILL`].
    pub fn skill_bar() -> Self {
        Self {
            hidden: Variant::IDENTITY.with_scale(0.0),
            visible: Variant::IDENTITY
                .with_transition(Transition::Tween { duration: SKILL_FILL, delay: Duration::ZERO }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_offsets() {
        assert_eq!(HERO_STAGGER.offset(0), Duration::from_millis(300));
        assert_eq!(HERO_STAGGER.offset(3), Duration::from_millis(900));
        assert_eq!(MENU_STAGGER.offset(0), Duration::ZERO);
        assert_eq!(PAGE_STAGGER.offset(5), Duration::from_millis(800));
    }

    #[test]
    fn huge_slot_saturates() {
        let offset = HERO_STAGGER.offset(usize::MAX);
        assert!(offset >= HERO_STAGGER.offset(1000));
    }

    #[test]
    fn item_table_passes_spring_through() {
        let table = VariantTable::item();
        assert!(!table.lookup(VariantState::Hidden).is_visible());
        assert_eq!(table.lookup(VariantState::Visible).transition, Transition::Spring(ITEM_SPRING));
    }

    #[test]
    fn container_orchestrates_children() {
        let table = VariantTable::container(HERO_STAGGER);
        assert_eq!(table.visible.transition, Transition::Stagger(HERO_STAGGER));
        assert!((table.hidden.opacity).abs() < f32::EPSILON);
    }

    #[test]
    fn skill_bar_tweens_from_zero_width() {
        let table = VariantTable::skill_bar();
        assert!(table.hidden.scale.abs() < f32::EPSILON);
        assert_eq!(table.visible.transition, Transition::Tween { duration: SKILL_FILL, delay: Duration::ZERO });
        assert_eq!(SKILL_STAGGER.offset(3), Duration::from_millis(600));
    }
}
