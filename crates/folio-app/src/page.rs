//! Mounted page.
//!
//! A [`Page`] exists from the moment its route is confirmed until the next
//! route replaces it. It owns the page's reveal sequencer, the viewport
//! observer for in-view triggers, and page-specific widgets (the hero card on
//! Home, the skill bars on About, the form on Contact). Dropping the page
//! drops its pending timers.
//!
//! Skill bars start growing once the last section is revealed.
//!
//! # Reveal triggers
//!
//! ```text
//! OnMount:  mount ──start──> Revealing ──ticks──> Visible
//!
//! InView:   mount ──> Hidden ──Entered──> Revealing ──ticks──> Visible
//!                       ^                     │                   │
//!                       └───────Left──────────┴───────────────────┘
//! ```

use std::time::Duration;

use folio_core::{
    config::RevealConfig,
    contact::ContactForm,
    env::Timestamp,
    hover::HoverCard,
    reveal::{RevealEvent, RevealSequencer},
    router::ViewId,
    skills::SkillMeters,
    viewport::{Region, Viewport, ViewportObserver},
};

/// Validated reveal setup for one view, cloned on each mount.
#[derive(Debug, Clone)]
pub(crate) struct PageTemplate {
    pub(crate) reveal: RevealConfig,
    pub(crate) observer: Option<ViewportObserver>,
    pub(crate) skill_bars: Option<usize>,
}

/// The page currently on screen.
#[derive(Debug)]
pub struct Page<I> {
    view: ViewId,
    observer: Option<ViewportObserver>,
    reveal: RevealSequencer<I>,
    hover: Option<HoverCard>,
    skills: Option<SkillMeters<I>>,
    form: Option<ContactForm<I>>,
}

impl<I: Timestamp> Page<I> {
    /// Mount `view` at `now`.
    ///
    /// Mount-triggered pages start revealing immediately. In-view pages stay
    /// hidden until layout reports a region inside `viewport`.
    pub(crate) fn mount(
        view: ViewId,
        template: &PageTemplate,
        viewport: Viewport,
        confirmation: Duration,
        now: I,
    ) -> Self {
        let mut page = Self {
            view,
            observer: template.observer.clone(),
            reveal: RevealSequencer::new(template.reveal.children, template.reveal.stagger),
            hover: (view == ViewId::Home).then(HoverCard::new),
            skills: template.skill_bars.map(SkillMeters::new),
            form: (view == ViewId::Contact).then(|| ContactForm::with_confirmation(confirmation)),
        };

        match page.observer.as_mut() {
            Some(observer) => {
                observer.observe_viewport(viewport);
            },
            None => {
                let events = page.reveal.start(now);
                page.grow_skills_after(&events, now);
            },
        }

        tracing::debug!(%view, tracked = page.observer.is_some(), "page mounted");
        page
    }

    /// Routed view.
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Reveal sequencer of the page sections.
    pub fn reveal(&self) -> &RevealSequencer<I> {
        &self.reveal
    }

    /// Viewport observer. `None` for mount-triggered pages.
    pub fn observer(&self) -> Option<&ViewportObserver> {
        self.observer.as_ref()
    }

    /// Hero card hover state. Only present on Home.
    pub fn hover(&self) -> Option<&HoverCard> {
        self.hover.as_ref()
    }

    /// Skill bars. Only present on About.
    pub fn skills(&self) -> Option<&SkillMeters<I>> {
        self.skills.as_ref()
    }

    /// Contact form. Only present on Contact.
    pub fn form(&self) -> Option<&ContactForm<I>> {
        self.form.as_ref()
    }

    pub(crate) fn form_mut(&mut self) -> Option<&mut ContactForm<I>> {
        self.form.as_mut()
    }

    pub(crate) fn hover_mut(&mut self) -> Option<&mut HoverCard> {
        self.hover.as_mut()
    }

    /// Start the skill bars when the last section appears.
    ///
    /// Bars start from the last section's slot rather than `now`, so a late
    /// tick does not delay them.
    fn grow_skills_after(&mut self, events: &[RevealEvent], now: I) {
        if !events.contains(&RevealEvent::Completed) {
            return;
        }
        let last_slot = self.reveal.child_count().saturating_sub(1);
        let at = self
            .reveal
            .started_at()
            .map_or(now, |started| started + self.reveal.stagger().offset(last_slot))
            .min(now);
        if let Some(skills) = self.skills.as_mut() {
            skills.start(at);
            tracing::debug!(view = %self.view, bars = skills.count(), "skill bars growing");
        }
    }

    /// Layout measured the tracked region.
    pub(crate) fn observe_region(&mut self, region: Option<Region>, now: I) -> Vec<RevealEvent> {
        let Some(observer) = self.observer.as_mut() else {
            return Vec::new();
        };
        let events = observer
            .observe_region(region)
            .map(|event| self.reveal.handle_viewport(event, now))
            .unwrap_or_default();
        self.grow_skills_after(&events, now);
        events
    }

    /// Viewport scrolled or resized.
    pub(crate) fn observe_viewport(&mut self, viewport: Viewport, now: I) -> Vec<RevealEvent> {
        let Some(observer) = self.observer.as_mut() else {
            return Vec::new();
        };
        let events = observer
            .observe_viewport(viewport)
            .map(|event| self.reveal.handle_viewport(event, now))
            .unwrap_or_default();
        self.grow_skills_after(&events, now);
        events
    }

    /// Fire due timers. Returns true if anything visible changed.
    pub(crate) fn tick(&mut self, now: I) -> bool {
        let events = self.reveal.tick(now);
        self.grow_skills_after(&events, now);
        let grown = self.skills.as_mut().is_some_and(|skills| skills.tick(now));
        let reset = self.form.as_mut().is_some_and(|form| form.tick(now));
        !events.is_empty() || grown || reset
    }

    /// Earliest pending deadline across the reveal, the skill bars and the
    /// form.
    pub fn next_deadline(&self) -> Option<I> {
        let skills = self.skills.as_ref().and_then(SkillMeters::next_deadline);
        let form = self.form.as_ref().and_then(ContactForm::next_deadline);
        [self.reveal.next_deadline(), skills, form].into_iter().flatten().min()
    }
}

impl<I> Drop for Page<I> {
    fn drop(&mut self) {
        tracing::debug!(view = %self.view, "page unmounted");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use folio_core::{config::SiteConfig, contact::Field, reveal::RevealStage};

    use super::*;

    fn template(view: ViewId) -> PageTemplate {
        let config = SiteConfig::default();
        let reveal = *config.reveal(view);
        PageTemplate {
            reveal,
            observer: reveal.observer(view).unwrap(),
            skill_bars: (view == ViewId::About).then_some(config.skill_bars),
        }
    }

    fn mount(view: ViewId, now: Instant) -> Page<Instant> {
        Page::mount(view, &template(view), Viewport::new(0, 40), Duration::from_secs(3), now)
    }

    #[test]
    fn mount_triggered_page_reveals_first_child_after_delay() {
        let t0 = Instant::now();
        let mut page = mount(ViewId::About, t0);

        assert_eq!(page.reveal().stage(), RevealStage::Revealing);
        assert_eq!(page.reveal().visible_child_count(), 0);
        assert_eq!(page.next_deadline(), Some(t0 + Duration::from_millis(300)));

        assert!(page.tick(t0 + Duration::from_millis(300)));
        assert_eq!(page.reveal().visible_child_count(), 1);
    }

    #[test]
    fn hero_waits_for_layout() {
        let t0 = Instant::now();
        let mut page = mount(ViewId::Home, t0);

        assert_eq!(page.reveal().stage(), RevealStage::Hidden);
        assert_eq!(page.next_deadline(), None);

        let events = page.observe_region(Some(Region::new(0, 20)), t0);
        assert_eq!(events.first(), Some(&RevealEvent::Started { epoch: 1 }));
        assert_eq!(page.reveal().stage(), RevealStage::Revealing);
    }

    #[test]
    fn hero_hides_when_scrolled_out() {
        let t0 = Instant::now();
        let mut page = mount(ViewId::Home, t0);
        page.observe_region(Some(Region::new(0, 20)), t0);

        let events = page.observe_viewport(Viewport::new(100, 40), t0);
        assert_eq!(events, vec![RevealEvent::Reset]);
        assert_eq!(page.reveal().stage(), RevealStage::Hidden);
    }

    #[test]
    fn unmeasured_region_stays_hidden() {
        let t0 = Instant::now();
        let mut page = mount(ViewId::Home, t0);

        assert!(page.observe_region(None, t0).is_empty());
        assert!(page.observe_viewport(Viewport::new(0, 100), t0).is_empty());
        assert_eq!(page.reveal().stage(), RevealStage::Hidden);
    }

    #[test]
    fn widgets_belong_to_their_pages() {
        let t0 = Instant::now();
        assert!(mount(ViewId::Home, t0).hover().is_some());
        assert!(mount(ViewId::Home, t0).form().is_none());
        assert!(mount(ViewId::Contact, t0).form().is_some());
        assert!(mount(ViewId::Location, t0).hover().is_none());
        assert!(mount(ViewId::About, t0).skills().is_some());
        assert!(mount(ViewId::Contact, t0).skills().is_none());
    }

    #[test]
    fn skill_bars_grow_after_last_section() {
        let t0 = Instant::now();
        let mut page = mount(ViewId::About, t0);

        // Sections at 300, 400 and 500ms
        page.tick(t0 + Duration::from_millis(400));
        assert!(!page.skills().unwrap().is_growing());
        assert_eq!(page.next_deadline(), Some(t0 + Duration::from_millis(500)));

        assert!(page.tick(t0 + Duration::from_millis(500)));
        let skills = page.skills().unwrap();
        assert!(skills.is_growing());
        assert_eq!(page.next_deadline(), Some(t0 + Duration::from_millis(550)));

        // First bar is halfway through its 1.5s fill
        assert!(page.tick(t0 + Duration::from_millis(1250)));
        assert!((page.skills().unwrap().progress(0) - 0.5).abs() < 1e-9);
        assert!((page.skills().unwrap().progress(3) - 0.1).abs() < 1e-9);

        // Last bar starts 600ms after the first
        assert!(page.tick(t0 + Duration::from_millis(2600)));
        assert!(page.skills().unwrap().is_complete());
        assert_eq!(page.next_deadline(), None);
    }

    #[test]
    fn late_tick_does_not_delay_skill_bars() {
        let t0 = Instant::now();
        let mut page = mount(ViewId::About, t0);

        // One tick long after every section was due
        assert!(page.tick(t0 + Duration::from_millis(1250)));
        assert!((page.skills().unwrap().progress(0) - 0.5).abs() < 1e-9);
        assert_eq!(page.next_deadline(), Some(t0 + Duration::from_millis(1300)));
    }

    #[test]
    fn form_reset_counts_as_change() {
        let t0 = Instant::now();
        let mut page = mount(ViewId::Contact, t0);
        page.tick(t0 + Duration::from_secs(1));

        let form = page.form_mut().unwrap();
        form.set_field(Field::Name, "Ada");
        form.set_field(Field::Email, "ada@example.com");
        form.set_field(Field::Message, "Hello");
        form.submit(t0 + Duration::from_secs(1)).unwrap();

        assert_eq!(page.next_deadline(), Some(t0 + Duration::from_secs(4)));
        assert!(page.tick(t0 + Duration::from_secs(4)));
        assert_eq!(page.form().unwrap().field(Field::Name), "");
    }
}
