//! Page chrome: the "back to top" button and the compact navigation panel.

/// Delay between clicking a navigation link and the panel closing, so the
/// scroll to the section starts first.
pub const NAV_CLOSE_DELAY: f64 = 0.5;

/// Sections of the page reachable from the navigation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Chart,
    Table,
    About,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Overview, Section::Chart, Section::Table, Section::About];

    pub fn title(self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Chart => "Chart",
            Section::Table => "Data",
            Section::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Scroll to top
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollToTop {
    threshold: f32,
    requested: bool,
}

impl ScrollToTop {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            requested: false,
        }
    }

    /// The button shows only once the page has scrolled past the threshold.
    pub fn is_visible(&self, offset: f32) -> bool {
        offset > self.threshold
    }

    pub fn request(&mut self) {
        self.requested = true;
    }

    /// Consume a pending request; `true` once per click.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

// ---------------------------------------------------------------------------
// Compact navigation
// ---------------------------------------------------------------------------

/// Visibility of the navigation panel in compact layouts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavToggle {
    open: bool,
    close_at: Option<f64>,
    target: Option<Section>,
}

impl NavToggle {
    /// Burger and close buttons both flip the panel.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.close_at = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// A link was clicked at time `now` (seconds). The section scroll is
    /// requested immediately, the panel closes after [`NAV_CLOSE_DELAY`].
    pub fn follow(&mut self, section: Section, now: f64) {
        self.target = Some(section);
        if self.open {
            self.close_at = Some(now + NAV_CLOSE_DELAY);
        }
    }

    /// Apply a due close. Returns the remaining delay when one is pending so
    /// the caller can schedule a repaint.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        let at = self.close_at?;
        if now >= at {
            self.open = false;
            self.close_at = None;
            None
        } else {
            Some(at - now)
        }
    }

    /// Section to scroll to, consumed by the page once it has scrolled.
    pub fn take_target(&mut self) -> Option<Section> {
        self.target.take()
    }
}
