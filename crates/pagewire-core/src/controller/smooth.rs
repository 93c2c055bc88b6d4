//! Smooth-scroll anchor navigation.
//!
//! Clicking a fragment link eases the scroll offset to the target section
//! top minus the fixed header height; the back-to-top control eases to 0.
//! The animation drives the page's scroll offset each frame, so derived
//! scroll state and intersection tracking follow it like real scrolling.

use std::time::{Duration, Instant};

use crate::anim::{timing, EasingType, EasingTypeExt};
use crate::config::ScrollConfig;
use crate::page::Page;

#[derive(Debug, Clone)]
struct ActiveScroll {
    start: Instant,
    from: f64,
    to: f64,
}

#[derive(Debug, Clone)]
pub struct PageScroller {
    animation: Option<ActiveScroll>,
    duration: Duration,
    easing: EasingType,
    header_offset: f64,
}

impl PageScroller {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            animation: None,
            duration: Duration::from_millis(config.smooth_duration_ms),
            easing: config.easing,
            header_offset: config.header_offset,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final position of the running animation, if any.
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.to)
    }

    /// Handle a click on an anchor link. `#` and `#top` scroll to the very
    /// top; any other fragment scrolls to its section compensated for the
    /// fixed header, and records the fragment on the page. A fragment
    /// without a matching element does nothing.
    pub fn anchor_clicked(&mut self, page: &mut Page, href: &str, now: Instant) {
        let Some(fragment) = href.strip_prefix('#') else {
            return;
        };
        if fragment.is_empty() || fragment == "top" {
            self.scroll_to(page, 0.0, now);
            return;
        }
        let Some(section) = page.find_id(fragment) else {
            return;
        };
        let target = page.element(section).top() - self.header_offset;
        self.scroll_to(page, target, now);
        page.set_fragment(fragment);
    }

    /// Back-to-top control: ease to offset 0.
    pub fn to_top(&mut self, page: &Page, now: Instant) {
        self.scroll_to(page, 0.0, now);
    }

    /// Start easing toward `target`, clamped to the page's scroll range.
    /// Already being at the target cancels instead of animating.
    pub fn scroll_to(&mut self, page: &Page, target: f64, now: Instant) {
        let target = target.clamp(0.0, page.max_scroll());
        let from = page.scroll_y();
        if from == target {
            self.animation = None;
            return;
        }
        self.animation = Some(ActiveScroll {
            start: now,
            from,
            to: target,
        });
    }

    /// Advance the animation one frame, applying the interpolated offset
    /// to the page. Returns true while the offset is being driven.
    pub fn update(&mut self, page: &mut Page, now: Instant) -> bool {
        let Some(anim) = &self.animation else {
            return false;
        };
        if timing::is_complete(anim.start, self.duration, now) {
            // Land exactly on the target, then stop driving.
            page.set_scroll_y(anim.to);
            self.animation = None;
        } else {
            let t = timing::progress(anim.start, self.duration, now);
            let eased = self.easing.apply(t);
            page.set_scroll_y(timing::lerp(anim.from, anim.to, eased));
        }
        true
    }

    pub fn cancel(&mut self) {
        self.animation = None;
    }
}
