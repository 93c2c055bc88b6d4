//! Hover-pausable marquee.
//!
//! Two flags combine into one play/pause decision: off-screen always
//! pauses; on-screen the hover state decides. The decision lands as the
//! `animation-play-state` inline style on the marquee content element.

use crate::page::Page;

/// Class of the scrolling content element.
pub const CONTENT_CLASS: &str = "marquee-content";
/// Class of the section that owns hover and visibility.
pub const SECTION_CLASS: &str = "testimonials";

#[derive(Debug, Clone, Default)]
pub struct MarqueeController {
    paused_by_hover: bool,
    intersecting: bool,
}

impl MarqueeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hover_enter(&mut self, page: &mut Page) {
        self.paused_by_hover = true;
        self.apply(page);
    }

    pub fn hover_leave(&mut self, page: &mut Page) {
        self.paused_by_hover = false;
        self.apply(page);
    }

    pub fn set_intersecting(&mut self, page: &mut Page, intersecting: bool) {
        self.intersecting = intersecting;
        self.apply(page);
    }

    /// The combined decision: paused unless on-screen and not hovered.
    pub fn is_paused(&self) -> bool {
        !self.intersecting || self.paused_by_hover
    }

    fn apply(&self, page: &mut Page) {
        let Some(content) = page.first_by_class(CONTENT_CLASS) else {
            return;
        };
        let state = if self.is_paused() { "paused" } else { "running" };
        page.set_style(content, "animation-play-state", state);
    }
}
