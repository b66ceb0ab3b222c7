//! Site configuration.
//!
//! Timing and trigger settings for every page, with defaults matching the
//! published site. Validated once up front so mounting a page cannot fail.

use std::time::Duration;

use crate::{
    contact::CONFIRMATION_DURATION,
    error::ConfigError,
    motion::{HERO_STAGGER, MENU_CLOSE_STAGGER, MENU_STAGGER, PAGE_STAGGER, StaggerConfig},
    reveal::RevealTrigger,
    router::{RouteTable, ViewId},
    viewport::{DEFAULT_VISIBILITY_THRESHOLD, ViewportObserver},
};

/// Path the site opens on.
pub const DEFAULT_INITIAL_PATH: &str = "/";

/// Reveal settings for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// What starts the reveal.
    pub trigger: RevealTrigger,
    /// Child timing.
    pub stagger: StaggerConfig,
    /// Number of staggered sections on the page.
    pub children: usize,
}

impl RevealConfig {
    /// Observer for the trigger. `None` for mount-triggered pages.
    ///
    /// # Errors
    ///
    /// - `ViewportError::InvalidThreshold` wrapped with the page
    pub fn observer(&self, view: ViewId) -> Result<Option<ViewportObserver>, ConfigError> {
        match self.trigger {
            RevealTrigger::OnMount => Ok(None),
            RevealTrigger::InView { threshold } => ViewportObserver::new(threshold)
                .map(Some)
                .map_err(|source| ConfigError::Reveal { view, source }),
        }
    }
}

/// Configuration of the whole site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Path the router starts at.
    pub initial_path: String,
    /// How long the contact confirmation shows.
    pub confirmation: Duration,
    /// Stagger of the mobile menu links.
    pub menu_stagger: StaggerConfig,
    /// Stagger of the menu links leaving, last link first.
    pub menu_close_stagger: StaggerConfig,
    /// Skill bars in the last About section.
    pub skill_bars: usize,
    /// Home page reveal.
    pub hero: RevealConfig,
    /// About page reveal.
    pub about: RevealConfig,
    /// Contact page reveal.
    pub contact: RevealConfig,
    /// Location page reveal.
    pub location: RevealConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let on_mount = |children| RevealConfig {
            trigger: RevealTrigger::OnMount,
            stagger: PAGE_STAGGER,
            children,
        };

        Self {
            initial_path: DEFAULT_INITIAL_PATH.to_string(),
            confirmation: CONFIRMATION_DURATION,
            menu_stagger: MENU_STAGGER,
            menu_close_stagger: MENU_CLOSE_STAGGER,
            skill_bars: 4,
            hero: RevealConfig {
                trigger: RevealTrigger::InView { threshold: DEFAULT_VISIBILITY_THRESHOLD },
                stagger: HERO_STAGGER,
                children: 4,
            },
            about: on_mount(3),
            contact: on_mount(3),
            location: on_mount(6),
        }
    }
}

impl SiteConfig {
    /// Reveal settings for `view`.
    pub fn reveal(&self, view: ViewId) -> &RevealConfig {
        match view {
            ViewId::Home => &self.hero,
            ViewId::About => &self.about,
            ViewId::Contact => &self.contact,
            ViewId::Location => &self.location,
        }
    }

    /// Check every page trigger and the initial path.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Reveal` for the first page with a bad threshold
    /// - `ConfigError::Route` if the initial path has no route
    pub fn validate(&self, table: &RouteTable) -> Result<(), ConfigError> {
        for view in ViewId::ALL {
            self.reveal(view).observer(view)?;
        }
        table.resolve(&self.initial_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RouteError, ViewportError};

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SiteConfig::default().validate(&RouteTable::standard()), Ok(()));
    }

    #[test]
    fn only_hero_tracks_viewport() {
        let config = SiteConfig::default();
        assert!(config.hero.observer(ViewId::Home).unwrap().is_some());
        assert!(config.about.observer(ViewId::About).unwrap().is_none());
    }

    #[test]
    fn bad_threshold_is_reported_with_page() {
        let mut config = SiteConfig::default();
        config.hero.trigger = RevealTrigger::InView { threshold: 2.0 };

        assert_eq!(config.validate(&RouteTable::standard()), Err(ConfigError::Reveal {
            view: ViewId::Home,
            source: ViewportError::InvalidThreshold(2.0),
        }));
    }

    #[test]
    fn unknown_initial_path_is_reported() {
        let config = SiteConfig { initial_path: "/blog".into(), ..SiteConfig::default() };
        assert_eq!(
            config.validate(&RouteTable::standard()),
            Err(ConfigError::Route(RouteError::NotFound { path: "/blog".into() }))
        );
    }
}
