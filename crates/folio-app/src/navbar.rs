//! Mounted navigation bar.
//!
//! Binds [`NavState`] to the scroll listener registry and drives the
//! mobile menu links: they stagger in when the menu opens and leave last
//! first when it closes. The scroll listener lives exactly as long as the
//! [`Navbar`]: dropping it unsubscribes.

use folio_core::{
    env::Timestamp,
    motion::{StaggerConfig, VariantTable},
    nav::{NavState, NavigationRequest},
    reveal::{RevealSequencer, RevealStage},
    router::ViewId,
    subscription::{ScrollRegistry, ScrollSubscription},
};

/// Registry key of the navbar's scroll listener.
pub const NAVBAR_LISTENER: &str = "navbar";

/// Navbar with its scroll subscription and menu animation.
#[derive(Debug)]
pub struct Navbar<I> {
    state: NavState,
    subscription: ScrollSubscription,
    menu: RevealSequencer<I>,
    close_stagger: StaggerConfig,
}

impl<I: Timestamp> Navbar<I> {
    /// Mount the navbar, registering its scroll listener.
    ///
    /// Mounting again on the same registry replaces the previous listener.
    pub fn mount(
        registry: &ScrollRegistry,
        current_path: &str,
        open_stagger: StaggerConfig,
        close_stagger: StaggerConfig,
    ) -> Self {
        let subscription = registry.subscribe(NAVBAR_LISTENER);
        tracing::debug!(path = current_path, "navbar mounted");

        Self {
            state: NavState::new(current_path),
            subscription,
            menu: RevealSequencer::new(ViewId::ALL.len(), open_stagger)
                .with_item_variants(VariantTable::menu_item()),
            close_stagger,
        }
    }

    /// Navbar state.
    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Scroll listener guard.
    pub fn subscription(&self) -> &ScrollSubscription {
        &self.subscription
    }

    /// Menu link sequencer.
    pub fn menu(&self) -> &RevealSequencer<I> {
        &self.menu
    }

    /// Deliver a scroll offset. Ignored once the listener is gone.
    ///
    /// Returns true if the scrolled flag changed.
    pub fn on_scroll(&mut self, offset: u32) -> bool {
        if !self.subscription.is_live() {
            return false;
        }
        self.state.set_scroll_offset(offset)
    }

    /// Flip the mobile menu. Links stagger in when it opens and out when it
    /// closes.
    pub fn toggle_menu(&mut self, now: I) {
        if self.state.toggle_mobile_menu() {
            self.menu.start(now);
        } else {
            self.conceal_links(now);
        }
    }

    /// Close the mobile menu. Returns true if it was open.
    pub fn close_menu(&mut self, now: I) -> bool {
        let was_open = self.state.close_mobile_menu();
        if was_open {
            self.conceal_links(now);
        }
        was_open
    }

    /// Select a link, closing the menu.
    pub fn select_link(&mut self, path: &str, now: I) -> NavigationRequest {
        let request = self.state.select_link(path);
        self.conceal_links(now);
        request
    }

    /// Adopt a route the router confirmed.
    pub fn confirm_route(&mut self, path: &str, now: I) {
        self.state.confirm_route(path);
        self.conceal_links(now);
    }

    /// Start the links leaving unless they already are.
    fn conceal_links(&mut self, now: I) {
        match self.menu.stage() {
            RevealStage::Revealing | RevealStage::Visible => {
                self.menu.conceal(now, self.close_stagger);
            },
            RevealStage::Hidden | RevealStage::Concealing => {},
        }
    }

    /// Fire due menu timers. Returns true if a link appeared or left.
    pub fn tick(&mut self, now: I) -> bool {
        !self.menu.tick(now).is_empty()
    }

    /// Next menu timer deadline.
    pub fn next_deadline(&self) -> Option<I> {
        self.menu.next_deadline()
    }

    /// Release the scroll listener early.
    ///
    /// Returns true if this call removed it.
    pub fn unmount(&mut self) -> bool {
        tracing::debug!("navbar unmounted");
        self.subscription.unsubscribe()
    }
}
