//! Client-side routing.
//!
//! A flat [`RouteTable`] maps exact paths to page views. The [`Router`]
//! resolves navigation intents against it and keeps a browser-style history
//! so back/forward navigation confirms routes the same way link clicks do.
//!
//! There is no nested or catch-all matching: an unmatched path is a
//! [`RouteError::NotFound`] fault that the caller answers with a fallback
//! view.

use std::fmt;

use crate::error::RouteError;

/// Page views reachable through the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    /// Landing page with the hero section.
    Home,
    /// About page.
    About,
    /// Contact form and details.
    Contact,
    /// Location page.
    Location,
}

impl ViewId {
    /// Every view, in navbar order.
    pub const ALL: [Self; 4] = [Self::Home, Self::About, Self::Contact, Self::Location];

    /// Link label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Contact => "Contact",
            Self::Location => "Location",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One path-to-view mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Absolute path, matched exactly.
    pub path: String,
    /// View rendered for the path.
    pub view: ViewId,
}

impl Route {
    /// Create a route.
    pub fn new(path: impl Into<String>, view: ViewId) -> Self {
        Self { path: path.into(), view }
    }
}

/// Ordered, immutable set of routes with unique paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, rejecting relative and duplicate paths.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, RouteError> {
        let mut table: Vec<Route> = Vec::new();

        for route in routes {
            if !route.path.starts_with('/') {
                return Err(RouteError::RelativePath { path: route.path });
            }
            if table.iter().any(|existing| existing.path == route.path) {
                return Err(RouteError::DuplicatePath { path: route.path });
            }
            table.push(route);
        }

        Ok(Self { routes: table })
    }

    /// The site's fixed table: `/`, `/about`, `/contact`, `/location`.
    pub fn standard() -> Self {
        Self {
            routes: vec![
                Route::new("/", ViewId::Home),
                Route::new("/about", ViewId::About),
                Route::new("/contact", ViewId::Contact),
                Route::new("/location", ViewId::Location),
            ],
        }
    }

    /// View for an exact path.
    pub fn resolve(&self, path: &str) -> Result<ViewId, RouteError> {
        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(|route| route.view)
            .ok_or_else(|| RouteError::NotFound { path: path.to_string() })
    }

    /// Path of the first route rendering `view`.
    pub fn path_of(&self, view: ViewId) -> Option<&str> {
        self.routes.iter().find(|route| route.view == view).map(|route| route.path.as_str())
    }

    /// Routes in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// A confirmed route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Confirmed path.
    pub path: String,
    /// View for the path.
    pub view: ViewId,
}

/// Resolves navigation and tracks the current path with history.
///
/// # Invariants
///
/// - `entries` is never empty and `cursor < entries.len()`
/// - Every entry resolved against the table when it was pushed
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    entries: Vec<Navigation>,
    cursor: usize,
}

impl Router {
    /// Create a router starting at `initial_path`.
    ///
    /// # Errors
    ///
    /// - `RouteError::NotFound` if the initial path has no route
    pub fn new(table: RouteTable, initial_path: &str) -> Result<Self, RouteError> {
        let view = table.resolve(initial_path)?;
        let initial = Navigation { path: initial_path.to_string(), view };
        Ok(Self { table, entries: vec![initial], cursor: 0 })
    }

    /// Route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Current confirmed route.
    pub fn current(&self) -> &Navigation {
        &self.entries[self.cursor]
    }

    /// Current path.
    pub fn current_path(&self) -> &str {
        &self.current().path
    }

    /// Current view.
    pub fn current_view(&self) -> ViewId {
        self.current().view
    }

    /// Resolve without navigating.
    pub fn resolve(&self, path: &str) -> Result<ViewId, RouteError> {
        self.table.resolve(path)
    }

    /// Navigate to `path`.
    ///
    /// On success the path becomes current and forward history is dropped.
    /// Navigating to the current path changes nothing.
    ///
    /// # Errors
    ///
    /// - `RouteError::NotFound` if no route matches; router state is unchanged
    pub fn navigate(&mut self, path: &str) -> Result<Navigation, RouteError> {
        let view = self.table.resolve(path)?;
        let navigation = Navigation { path: path.to_string(), view };

        if self.current_path() != path {
            self.entries.truncate(self.cursor + 1);
            self.entries.push(navigation.clone());
            self.cursor += 1;
        }

        tracing::info!(path, %view, "route confirmed");
        Ok(navigation)
    }

    /// Step back in history. `None` at the oldest entry.
    pub fn back(&mut self) -> Option<Navigation> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current().clone())
    }

    /// Step forward in history. `None` at the newest entry.
    pub fn forward(&mut self) -> Option<Navigation> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current().clone())
    }

    /// Whether [`Self::back`] would move.
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`Self::forward`] would move.
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }
}
