//! Scroll-derived header and back-to-top state.
//!
//! Runs on each admitted scroll tick and applies three independent
//! derivations as class toggles: the condensed header treatment, the
//! hide-on-scroll-down header, and the back-to-top control visibility.

use crate::config::ScrollConfig;
use crate::page::Page;

/// Element id of the back-to-top control.
pub const BACK_TO_TOP_ID: &str = "backToTopBtn";

const SCROLLED: &str = "scrolled";
const HIDDEN: &str = "header-hidden";
const SHOW: &str = "show";

#[derive(Debug, Clone)]
pub struct ScrollReactor {
    scrolled_threshold: f64,
    hide_threshold: f64,
    back_to_top_threshold: f64,
    last_scroll_y: f64,
}

impl ScrollReactor {
    pub fn new(config: &ScrollConfig, initial_scroll_y: f64) -> Self {
        Self {
            scrolled_threshold: config.scrolled_threshold,
            hide_threshold: config.hide_threshold,
            back_to_top_threshold: config.back_to_top_threshold,
            last_scroll_y: initial_scroll_y,
        }
    }

    /// Recompute the derived states from the page's current scroll offset.
    /// Idempotent: back-to-back ticks at the same offset change nothing.
    pub fn update(&mut self, page: &mut Page) {
        let y = page.scroll_y();

        if let Some(header) = page.first_by_tag("header") {
            page.set_class(header, SCROLLED, y > self.scrolled_threshold);
            // Hidden only while moving down past the threshold; any upward
            // movement brings the header back.
            let hidden = y > self.last_scroll_y && y > self.hide_threshold;
            page.set_class(header, HIDDEN, hidden);
        }

        self.last_scroll_y = y;

        if let Some(button) = page.find_id(BACK_TO_TOP_ID) {
            page.set_class(button, SHOW, y > self.back_to_top_threshold);
        }
    }
}
