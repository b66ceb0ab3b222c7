//! Viewport intersection tracking.
//!
//! [`ViewportObserver`] decides whether a tracked [`Region`] of the document
//! is visible inside the current [`Viewport`], and emits a discrete
//! [`ViewportEvent`] whenever that answer changes. Consumers react to the
//! events rather than re-polling the observer.
//!
//! Units are whatever the host measures in: pixels in a browser, rows in a
//! terminal. Regions are in document coordinates; the viewport is the window
//! onto the document starting at the scroll offset.

use crate::error::ViewportError;

/// Scroll offset above which the page counts as scrolled.
pub const SCROLL_THRESHOLD: u32 = 10;

/// Visibility fraction used by the hero page.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.1;

/// Returns true if the page is scrolled past [`SCROLL_THRESHOLD`].
///
/// The boundary is exclusive: an offset of exactly 10 is not scrolled.
pub fn is_scrolled(offset: u32) -> bool {
    offset > SCROLL_THRESHOLD
}

/// Visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Vertical scroll offset from the top of the document.
    pub scroll_offset: u32,
    /// Visible height.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport at the given scroll offset.
    pub fn new(scroll_offset: u32, height: u32) -> Self {
        Self { scroll_offset, height }
    }

    /// First document row past the visible window.
    pub fn bottom(&self) -> u32 {
        self.scroll_offset.saturating_add(self.height)
    }
}

/// Measured area of a tracked element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Offset of the element's top edge from the top of the document.
    pub top: u32,
    /// Element height.
    pub height: u32,
}

impl Region {
    /// Create a region.
    pub fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    /// First document row past the element.
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// Fraction of `region` covered by `viewport`, in `[0.0, 1.0]`.
///
/// Zero-height regions report `0.0`.
pub fn intersection_ratio(region: Region, viewport: Viewport) -> f64 {
    if region.height == 0 {
        return 0.0;
    }

    let overlap_top = region.top.max(viewport.scroll_offset);
    let overlap_bottom = region.bottom().min(viewport.bottom());
    let overlap = overlap_bottom.saturating_sub(overlap_top);

    f64::from(overlap) / f64::from(region.height)
}

/// Visibility transition emitted by [`ViewportObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// Tracked region became visible.
    Entered,
    /// Tracked region stopped being visible (or was unmounted).
    Left,
}

/// Tracks whether one region intersects the viewport.
///
/// Starts out of view with no measured region. Feeding it layout and
/// scroll/resize changes yields events only on transitions.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    threshold: f64,
    region: Option<Region>,
    viewport: Viewport,
    in_view: bool,
}

impl ViewportObserver {
    /// Create an observer with a visibility threshold in `[0.0, 1.0]`.
    ///
    /// A threshold of `0.0` means any non-empty overlap counts.
    pub fn new(threshold: f64) -> Result<Self, ViewportError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ViewportError::InvalidThreshold(threshold));
        }

        Ok(Self { threshold, region: None, viewport: Viewport::default(), in_view: false })
    }

    /// Visibility threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the tracked region currently counts as visible.
    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Last measured region. `None` if the element is not rendered.
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// Last known viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Record a new layout measurement.
    ///
    /// `None` means the element is not (or no longer) rendered.
    pub fn observe_region(&mut self, region: Option<Region>) -> Option<ViewportEvent> {
        self.region = region;
        self.reevaluate()
    }

    /// Record a scroll or resize of the viewport.
    pub fn observe_viewport(&mut self, viewport: Viewport) -> Option<ViewportEvent> {
        self.viewport = viewport;
        self.reevaluate()
    }

    fn reevaluate(&mut self) -> Option<ViewportEvent> {
        let now_in_view = self.region.is_some_and(|region| {
            let ratio = intersection_ratio(region, self.viewport);
            ratio > 0.0 && ratio >= self.threshold
        });

        match (self.in_view, now_in_view) {
            (false, true) => {
                self.in_view = true;
                tracing::debug!(region = ?self.region, viewport = ?self.viewport, "region entered viewport");
                Some(ViewportEvent::Entered)
            },
            (true, false) => {
                self.in_view = false;
                tracing::debug!(region = ?self.region, viewport = ?self.viewport, "region left viewport");
                Some(ViewportEvent::Left)
            },
            _ => None,
        }
    }
}
