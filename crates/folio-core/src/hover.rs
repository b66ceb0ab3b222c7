//! Hover-driven card poses.
//!
//! The hero image card lifts and grows while the pointer is over it, and an
//! "available for work" badge slides in after a short delay. Both are two-state
//! variant tables selected by a single hover flag.

use std::time::Duration;

use crate::motion::{DEFAULT_TWEEN, ITEM_SPRING, Transition, Variant, VariantState, VariantTable};

/// Delay before the badge follows the card.
pub const BADGE_DELAY: Duration = Duration::from_millis(200);

/// Hover state of one card.
#[derive(Debug, Clone)]
pub struct HoverCard {
    hovered: bool,
    card: VariantTable,
    badge: VariantTable,
}

impl Default for HoverCard {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverCard {
    /// Create a card at rest.
    pub fn new() -> Self {
        let spring = Transition::Spring(ITEM_SPRING);
        Self {
            hovered: false,
            card: VariantTable {
                hidden: Variant::IDENTITY.with_scale(1.05).with_transition(spring),
                visible: Variant::IDENTITY.with_scale(1.1).with_offset(0.0, -10.0).with_transition(spring),
            },
            badge: VariantTable {
                hidden: Variant::IDENTITY.with_opacity(0.0).with_offset(20.0, 20.0),
                visible: Variant::IDENTITY
                    .with_transition(Transition::Tween { duration: DEFAULT_TWEEN, delay: BADGE_DELAY }),
            },
        }
    }

    /// Whether the pointer is over the card.
    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Pointer entered the card. Returns true if the state changed.
    pub fn pointer_enter(&mut self) -> bool {
        !std::mem::replace(&mut self.hovered, true)
    }

    /// Pointer left the card. Returns true if the state changed.
    pub fn pointer_leave(&mut self) -> bool {
        std::mem::replace(&mut self.hovered, false)
    }

    fn state(&self) -> VariantState {
        if self.hovered { VariantState::Visible } else { VariantState::Hidden }
    }

    /// Target pose of the card.
    pub fn card_pose(&self) -> &Variant {
        self.card.lookup(self.state())
    }

    /// Target pose of the badge.
    pub fn badge_pose(&self) -> &Variant {
        self.badge.lookup(self.state())
    }
}
