//! Visibility-triggered counter animation.
//!
//! Each observed element animates its displayed integer from 0 to the
//! value of its `data-target` attribute over a fixed duration with quartic
//! ease-out, then displays the exact target and is never triggered again.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::anim::{timing, EasingType, EasingTypeExt};
use crate::config::CounterConfig;
use crate::page::{ElementId, Page};

/// Class carried by animated metric elements.
pub const METRIC_CLASS: &str = "metric-number";
/// Attribute holding the terminal value.
pub const TARGET_ATTR: &str = "data-target";

#[derive(Debug, Clone)]
struct ActiveCount {
    element: ElementId,
    target: u64,
    start: Instant,
}

#[derive(Debug, Clone)]
pub struct CounterAnimator {
    duration: Duration,
    active: Vec<ActiveCount>,
    finished: HashSet<ElementId>,
}

impl CounterAnimator {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            duration: Duration::from_millis(config.duration_ms),
            active: Vec::new(),
            finished: HashSet::new(),
        }
    }

    /// Begin the one-shot animation for an element that just became
    /// visible. Elements with a missing or unparseable target are written
    /// off so they are not retried. Returns false if nothing started.
    pub fn trigger(&mut self, page: &Page, element: ElementId, now: Instant) -> bool {
        if self.finished.contains(&element)
            || self.active.iter().any(|a| a.element == element)
        {
            return false;
        }

        let target = page
            .element(element)
            .attr(TARGET_ATTR)
            .and_then(|raw| raw.parse::<u64>().ok());
        let Some(target) = target else {
            debug!(element = %page.label(element), "counter target missing or unparseable");
            self.finished.insert(element);
            return false;
        };

        self.active.push(ActiveCount {
            element,
            target,
            start: now,
        });
        true
    }

    /// Advance every running animation one frame.
    pub fn tick(&mut self, page: &mut Page, now: Instant) {
        let duration = self.duration;
        for anim in &self.active {
            let p = timing::progress(anim.start, duration, now);
            if p < 1.0 {
                let eased = EasingType::QuartOut.apply(p);
                let displayed = (eased * anim.target as f64).floor() as u64;
                page.set_text(anim.element, &displayed.to_string());
            } else {
                // Terminal value is the exact target, not the eased floor.
                page.set_text(anim.element, &anim.target.to_string());
            }
        }

        let finished = &mut self.finished;
        self.active.retain(|anim| {
            if timing::is_complete(anim.start, duration, now) {
                finished.insert(anim.element);
                false
            } else {
                true
            }
        });
    }

    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }

    /// Whether an element has already run (or been written off).
    pub fn is_finished(&self, element: ElementId) -> bool {
        self.finished.contains(&element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSpec;

    fn counter_page(target: &str) -> Page {
        let spec: PageSpec = toml::from_str(&format!(
            r#"
            viewport_height = 800.0

            [[elements]]
            tag = "span"
            id = "metric"
            classes = ["metric-number"]
            text = "0"
            top = 900.0
            height = 40.0
            [elements.attrs]
            data-target = "{target}"
            "#
        ))
        .unwrap();
        spec.build().unwrap()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_eased_midpoint_and_exact_terminal() {
        let mut page = counter_page("1000");
        let metric = page.find_id("metric").unwrap();
        let mut counters = CounterAnimator::new(&CounterConfig::default());
        let start = Instant::now();

        assert!(counters.trigger(&page, metric, start));
        assert!(counters.is_animating());

        counters.tick(&mut page, start + ms(1000));
        // floor((1 - 0.5^4) * 1000) = 937
        assert_eq!(page.element(metric).text(), "937");

        counters.tick(&mut page, start + ms(2000));
        assert_eq!(page.element(metric).text(), "1000");
        assert!(!counters.is_animating());
        assert!(counters.is_finished(metric));
    }

    #[test]
    fn test_progress_monotonic() {
        let mut page = counter_page("500");
        let metric = page.find_id("metric").unwrap();
        let mut counters = CounterAnimator::new(&CounterConfig::default());
        let start = Instant::now();
        counters.trigger(&page, metric, start);

        let mut last = 0;
        for step in (0..=2000).step_by(100) {
            counters.tick(&mut page, start + ms(step));
            let displayed: u64 = page.element(metric).text().parse().unwrap();
            assert!(displayed >= last, "regressed at {step}ms");
            last = displayed;
        }
        assert_eq!(last, 500);
    }

    #[test]
    fn test_never_retriggers() {
        let mut page = counter_page("100");
        let metric = page.find_id("metric").unwrap();
        let mut counters = CounterAnimator::new(&CounterConfig::default());
        let start = Instant::now();

        counters.trigger(&page, metric, start);
        counters.tick(&mut page, start + ms(2000));
        assert_eq!(page.element(metric).text(), "100");

        assert!(!counters.trigger(&page, metric, start + ms(3000)));
        assert!(!counters.is_animating());
    }

    #[test]
    fn test_double_trigger_while_running_ignored() {
        let page = counter_page("100");
        let metric = page.find_id("metric").unwrap();
        let mut counters = CounterAnimator::new(&CounterConfig::default());
        let start = Instant::now();

        assert!(counters.trigger(&page, metric, start));
        assert!(!counters.trigger(&page, metric, start + ms(10)));
    }

    #[test]
    fn test_unparseable_target_written_off() {
        let page = counter_page("soon");
        let metric = page.find_id("metric").unwrap();
        let mut counters = CounterAnimator::new(&CounterConfig::default());

        assert!(!counters.trigger(&page, metric, Instant::now()));
        assert!(counters.is_finished(metric));
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut page = counter_page("42");
        let metric = page.find_id("metric").unwrap();
        let mut counters = CounterAnimator::new(&CounterConfig { duration_ms: 0 });
        let start = Instant::now();
        counters.trigger(&page, metric, start);
        counters.tick(&mut page, start);
        assert_eq!(page.element(metric).text(), "42");
        assert!(!counters.is_animating());
    }
}
