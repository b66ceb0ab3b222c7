//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use folio_app::{NAVBAR_LISTENER, Screen};
use folio_core::{reveal::RevealStage, viewport::is_scrolled};

use super::{Invariant, InvariantResult, RevealSnapshot, SystemSnapshot, Violation};

/// Navbar's active link must be the router's confirmed path.
///
/// The navbar never highlights a link optimistically, and back/forward
/// navigation moves both together.
pub struct ActivePathMatchesRouter;

impl Invariant for ActivePathMatchesRouter {
    fn name(&self) -> &'static str {
        "active_path_matches_router"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if state.active_path != state.router_path {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "navbar shows {:?} but router is at {:?}",
                    state.active_path, state.router_path
                ),
            });
        }
        Ok(())
    }
}

/// Reveal groups never show more children than they have, and the stage
/// agrees with the count.
///
/// Hidden means none visible; Visible means all visible. A concealing group
/// still has at least one child on screen.
pub struct RevealCountBounded;

impl RevealCountBounded {
    fn check_group(&self, group: &str, reveal: RevealSnapshot) -> InvariantResult {
        let consistent = reveal.visible <= reveal.children
            && match reveal.stage {
                RevealStage::Hidden => reveal.visible == 0,
                RevealStage::Revealing => reveal.visible < reveal.children,
                RevealStage::Visible => reveal.visible == reveal.children,
                RevealStage::Concealing => reveal.visible > 0,
            };

        if consistent {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.name(),
                message: format!(
                    "{group}: stage {:?} with {}/{} children visible",
                    reveal.stage, reveal.visible, reveal.children
                ),
            })
        }
    }
}

impl Invariant for RevealCountBounded {
    fn name(&self) -> &'static str {
        "reveal_count_bounded"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        self.check_group("menu", state.menu)?;
        if let Some(reveal) = state.page_reveal {
            self.check_group("page", reveal)?;
        }
        Ok(())
    }
}

/// Menu links enter only while the menu is open and leave only once it is
/// closed.
pub struct MenuStageFollowsToggle;

impl Invariant for MenuStageFollowsToggle {
    fn name(&self) -> &'static str {
        "menu_stage_follows_toggle"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let consistent = match state.menu.stage {
            RevealStage::Revealing | RevealStage::Visible => state.menu_open,
            RevealStage::Hidden | RevealStage::Concealing => !state.menu_open,
        };

        if consistent {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.name(),
                message: format!("menu links {:?} with menu_open={}", state.menu.stage, state.menu_open),
            })
        }
    }
}

/// Navbar background flag follows the scroll offset threshold.
pub struct ScrolledMatchesOffset;

impl Invariant for ScrolledMatchesOffset {
    fn name(&self) -> &'static str {
        "scrolled_matches_offset"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if state.navbar_listening && state.scrolled != is_scrolled(state.scroll_offset) {
            return Err(Violation {
                invariant: self.name(),
                message: format!("scrolled={} at offset {}", state.scrolled, state.scroll_offset),
            });
        }
        Ok(())
    }
}

/// Exactly one scroll listener is registered while the navbar is mounted.
pub struct SingleScrollListener;

impl Invariant for SingleScrollListener {
    fn name(&self) -> &'static str {
        "single_scroll_listener"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let navbar_listeners = state.listeners.iter().filter(|k| *k == NAVBAR_LISTENER).count();
        let expected = usize::from(state.navbar_listening);

        if navbar_listeners != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "{navbar_listeners} navbar listeners registered, expected {expected}: {:?}",
                    state.listeners
                ),
            });
        }
        Ok(())
    }
}

/// The mounted page is the router's view, and the fallback has no page.
pub struct ScreenMatchesPage;

impl Invariant for ScreenMatchesPage {
    fn name(&self) -> &'static str {
        "screen_matches_page"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let consistent = match &state.screen {
            Screen::Page(view) => state.page_view == Some(*view),
            Screen::NotFound { .. } => state.page_view.is_none(),
        };

        if consistent {
            Ok(())
        } else {
            Err(Violation {
                invariant: self.name(),
                message: format!("screen {:?} with mounted page {:?}", state.screen, state.page_view),
            })
        }
    }
}
