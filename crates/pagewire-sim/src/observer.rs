//! Viewport intersection tracking.
//!
//! Computes how much of each watched element is visible within the
//! viewport and reports threshold crossings after every scroll change.
//! The bottom margin deflates the viewport so elements must rise a little
//! above the fold before counting as visible.

use std::collections::BTreeMap;

use pagewire_core::{ElementId, Page};

#[derive(Debug, Clone)]
pub struct IntersectionTracker {
    threshold: f64,
    bottom_margin: f64,
    watched: BTreeMap<ElementId, bool>,
}

impl IntersectionTracker {
    pub fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold,
            bottom_margin,
            watched: BTreeMap::new(),
        }
    }

    /// Start watching an element. Initial state is "not intersecting", so
    /// the first evaluation reports elements already on screen.
    pub fn observe(&mut self, element: ElementId) {
        self.watched.entry(element).or_insert(false);
    }

    /// Stop watching permanently.
    pub fn unobserve(&mut self, element: ElementId) {
        self.watched.remove(&element);
    }

    pub fn is_watching(&self, element: ElementId) -> bool {
        self.watched.contains_key(&element)
    }

    /// Current intersection state of a watched element.
    pub fn is_intersecting(&self, element: ElementId) -> bool {
        self.watched.get(&element).copied().unwrap_or(false)
    }

    /// Re-evaluate every watched element and return the crossings, in
    /// element document order, as `(element, now_intersecting)`.
    pub fn evaluate(&mut self, page: &Page) -> Vec<(ElementId, bool)> {
        let mut crossings = Vec::new();
        for (&element, state) in self.watched.iter_mut() {
            let intersecting = Self::intersects(
                page,
                element,
                self.threshold,
                self.bottom_margin,
            );
            if intersecting != *state {
                *state = intersecting;
                crossings.push((element, intersecting));
            }
        }
        crossings
    }

    /// Ratio of the element's height visible in the (deflated) viewport.
    pub fn visible_ratio(page: &Page, element: ElementId, bottom_margin: f64) -> f64 {
        let (top, bottom) = page.element(element).span();
        let view_top = page.scroll_y();
        let view_bottom = view_top + page.viewport_height() - bottom_margin;
        if view_bottom <= view_top {
            return 0.0;
        }
        let height = bottom - top;
        if height <= 0.0 {
            // Zero-height elements intersect when their edge is inside the box.
            return if top >= view_top && top < view_bottom {
                1.0
            } else {
                0.0
            };
        }
        let overlap = (bottom.min(view_bottom) - top.max(view_top)).max(0.0);
        overlap / height
    }

    fn intersects(page: &Page, element: ElementId, threshold: f64, bottom_margin: f64) -> bool {
        let ratio = Self::visible_ratio(page, element, bottom_margin);
        if threshold > 0.0 {
            ratio >= threshold
        } else {
            ratio > 0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewire_core::PageSpec;

    fn page() -> Page {
        let spec: PageSpec = toml::from_str(
            r#"
            viewport_height = 800.0
            page_height = 3000.0

            [[elements]]
            tag = "span"
            id = "metric"
            classes = ["metric-number"]
            top = 1000.0
            height = 100.0
            "#,
        )
        .unwrap();
        spec.build().unwrap()
    }

    #[test]
    fn test_crossing_reported_once() {
        let mut page = page();
        let metric = page.find_id("metric").unwrap();
        let mut tracker = IntersectionTracker::new(0.1, 50.0);
        tracker.observe(metric);

        // Off screen at the top of the page.
        assert!(tracker.evaluate(&page).is_empty());

        // Scrolled into view: one crossing to true.
        page.set_scroll_y(500.0);
        assert_eq!(tracker.evaluate(&page), vec![(metric, true)]);
        // Stable: no repeated reports.
        assert!(tracker.evaluate(&page).is_empty());
        assert!(tracker.is_intersecting(metric));

        // Scrolled past: crossing back to false.
        page.set_scroll_y(2000.0);
        assert_eq!(tracker.evaluate(&page), vec![(metric, false)]);
    }

    #[test]
    fn test_bottom_margin_deflates_viewport() {
        let mut page = page();
        let metric = page.find_id("metric").unwrap();

        // Element top at 1000; viewport [260, 1010) before margin.
        page.set_scroll_y(260.0);
        // Without margin 10px of 100 are visible: ratio 0.1.
        assert!(
            (IntersectionTracker::visible_ratio(&page, metric, 0.0) - 0.1).abs() < 1e-9
        );
        // The 50px margin pulls the fold up to 1010 - 50 = 960: nothing visible.
        assert_eq!(IntersectionTracker::visible_ratio(&page, metric, 50.0), 0.0);
    }

    #[test]
    fn test_threshold_boundary() {
        let mut page = page();
        let metric = page.find_id("metric").unwrap();
        let mut tracker = IntersectionTracker::new(0.1, 50.0);
        tracker.observe(metric);

        // Visible height = (scroll + 750) - 1000; ratio 0.1 needs 10px.
        page.set_scroll_y(260.0);
        assert_eq!(tracker.evaluate(&page), vec![(metric, true)]);

        page.set_scroll_y(259.0);
        assert_eq!(tracker.evaluate(&page), vec![(metric, false)]);
    }

    #[test]
    fn test_zero_threshold_means_any_pixel() {
        let mut page = page();
        let metric = page.find_id("metric").unwrap();
        let mut tracker = IntersectionTracker::new(0.0, 0.0);
        tracker.observe(metric);

        page.set_scroll_y(201.0); // 1px visible
        assert_eq!(tracker.evaluate(&page), vec![(metric, true)]);
        page.set_scroll_y(200.0); // touching, zero overlap
        assert_eq!(tracker.evaluate(&page), vec![(metric, false)]);
    }

    #[test]
    fn test_unobserve_stops_reports() {
        let mut page = page();
        let metric = page.find_id("metric").unwrap();
        let mut tracker = IntersectionTracker::new(0.1, 50.0);
        tracker.observe(metric);
        tracker.unobserve(metric);
        page.set_scroll_y(500.0);
        assert!(tracker.evaluate(&page).is_empty());
        assert!(!tracker.is_watching(metric));
    }
}
