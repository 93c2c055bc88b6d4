//! The interaction engine.
//!
//! Owns the page, the controllers and every source of deferred work:
//! frame ticks while an animation runs, debounced field revalidation, the
//! simulated submission round trip and the feedback display window.
//! Single-threaded and cooperative; `dispatch` handles an event at the
//! current simulated time and `advance` drains due work in timestamp
//! order.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use pagewire_core::config::AppConfig;
use pagewire_core::controller::{
    counter, form, header, marquee, menu, CounterAnimator, FormController, MarqueeController,
    MenuController, NavHighlighter, PageScroller, ScrollReactor, SubmitDecision, SubmitOutcome,
};
use pagewire_core::{ElementId, Page, Result, Throttler};

use crate::clock::SimClock;
use crate::event::{Key, PageEvent};
use crate::observer::IntersectionTracker;
use crate::scenario::Scenario;
use crate::trace::Trace;

const LOADER_CLASS: &str = "page-loader";

pub struct Engine {
    page: Page,
    clock: SimClock,
    menu: MenuController,
    reactor: ScrollReactor,
    nav: NavHighlighter,
    counters: CounterAnimator,
    marquee: MarqueeController,
    scroller: PageScroller,
    form: FormController,
    scroll_gate: Throttler,
    counter_watch: IntersectionTracker,
    marquee_watch: IntersectionTracker,
    marquee_section: Option<ElementId>,
    frame_interval: Duration,
    next_frame: Option<Instant>,
    submit_delay: Duration,
    feedback_timeout: Duration,
    submit_due: Option<(Instant, SubmitOutcome)>,
    feedback_due: Option<Instant>,
    trace: Trace,
}

impl Engine {
    /// Build the engine and run the load-time pass: hide the page loader,
    /// highlight the section under the initial scroll position, and take
    /// the first intersection snapshot (counters already on screen start
    /// immediately, the marquee learns whether it is visible).
    pub fn new(page: Page, config: &AppConfig) -> Result<Self> {
        let mut counter_watch = IntersectionTracker::new(
            config.observer.counter_threshold,
            config.observer.bottom_margin,
        );
        for element in page.by_class(counter::METRIC_CLASS) {
            counter_watch.observe(element);
        }

        let mut marquee_watch = IntersectionTracker::new(config.observer.marquee_threshold, 0.0);
        let marquee_section = page.first_by_class(marquee::SECTION_CLASS);
        if let Some(section) = marquee_section {
            marquee_watch.observe(section);
        }

        let frame_rate = u64::from(config.general.frame_rate.max(1));
        let initial_scroll = page.scroll_y();

        let mut engine = Self {
            page,
            clock: SimClock::new(),
            menu: MenuController::new(),
            reactor: ScrollReactor::new(&config.scroll, initial_scroll),
            nav: NavHighlighter::new(&config.nav),
            counters: CounterAnimator::new(&config.counter),
            marquee: MarqueeController::new(),
            scroller: PageScroller::new(&config.scroll),
            form: FormController::new(&config.form)?,
            scroll_gate: Throttler::new(Duration::from_millis(config.scroll.throttle_ms)),
            counter_watch,
            marquee_watch,
            marquee_section,
            frame_interval: Duration::from_millis((1000 / frame_rate).max(1)),
            next_frame: None,
            submit_delay: Duration::from_millis(config.form.submit_delay_ms),
            feedback_timeout: Duration::from_millis(config.form.feedback_timeout_ms),
            submit_due: None,
            feedback_due: None,
            trace: Trace::new(),
        };
        engine.startup();
        Ok(engine)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn is_marquee_paused(&self) -> bool {
        self.marquee.is_paused()
    }

    fn startup(&mut self) {
        if let Some(loader) = self.page.first_by_class(LOADER_CLASS) {
            self.page.add_class(loader, "hidden");
        }
        self.nav.update(&mut self.page);
        self.process_intersections();
        // The marquee needs its visibility applied even without a
        // crossing, so an off-screen marquee starts paused.
        if let Some(section) = self.marquee_section {
            let intersecting = self.marquee_watch.is_intersecting(section);
            self.marquee.set_intersecting(&mut self.page, intersecting);
        }
        self.flush();
    }

    /// Handle one interaction at the current simulated time.
    pub fn dispatch(&mut self, event: &PageEvent) {
        let now = self.clock.now();
        debug!(at_ms = self.clock.elapsed_ms(), ?event, "dispatch");
        match event {
            PageEvent::ScrollTo { y } => {
                self.page.set_scroll_y(*y);
                self.after_scroll(now);
            }
            PageEvent::Click { target } => self.click(target, now),
            PageEvent::KeyDown { key } => {
                if *key == Key::Escape {
                    self.menu.escape(&mut self.page);
                }
            }
            PageEvent::MouseEnter { target } => {
                if self.is_marquee_target(target) {
                    self.marquee.hover_enter(&mut self.page);
                }
            }
            PageEvent::MouseLeave { target } => {
                if self.is_marquee_target(target) {
                    self.marquee.hover_leave(&mut self.page);
                }
            }
            PageEvent::Input { target, value } => {
                if let Some(field) = self.resolve(target) {
                    self.form.input(&mut self.page, field, value, now);
                } else {
                    debug!("input target not found: {target}");
                }
            }
            PageEvent::Blur { target } => {
                if let Some(field) = self.resolve(target) {
                    self.form.blur(&mut self.page, field);
                }
            }
            PageEvent::Submit { outcome } => self.submit(*outcome, now),
        }
        self.flush();
    }

    /// Move simulated time forward, firing due work in timestamp order.
    pub fn advance(&mut self, delta: Duration) {
        let target = self.clock.now() + delta;
        loop {
            if self.animations_active() {
                if self.next_frame.is_none() {
                    self.next_frame = Some(self.clock.now() + self.frame_interval);
                }
            } else {
                self.next_frame = None;
            }

            let candidates = [
                self.next_frame,
                self.form.next_deadline(),
                self.submit_due.map(|(at, _)| at),
                self.feedback_due,
            ];
            let due = candidates.into_iter().flatten().min();

            match due {
                Some(at) if at <= target => {
                    self.clock.advance_to(at);
                    self.run_due(at);
                }
                _ => break,
            }
        }
        self.clock.advance_to(target);
    }

    /// Play a scenario from the beginning of time.
    pub fn run_scenario(&mut self, scenario: &Scenario) -> Result<()> {
        scenario.validate()?;
        for step in &scenario.steps {
            let at = self.clock.origin() + Duration::from_millis(step.at_ms);
            let now = self.clock.now();
            if at < now {
                return Err(pagewire_core::Error::Scenario(format!(
                    "step at {}ms is before the current time",
                    step.at_ms
                )));
            }
            self.advance(at - now);
            self.dispatch(&step.event);
        }
        Ok(())
    }

    /// Whether any deferred work remains.
    pub fn has_pending_work(&self) -> bool {
        self.animations_active()
            || self.form.next_deadline().is_some()
            || self.submit_due.is_some()
            || self.feedback_due.is_some()
    }

    /// Run the clock forward until all deferred work has settled, up to
    /// `max` of simulated time.
    pub fn drain(&mut self, max: Duration) {
        let deadline = self.clock.now() + max;
        while self.has_pending_work() && self.clock.now() < deadline {
            let step = self.frame_interval.min(deadline - self.clock.now());
            self.advance(step);
        }
    }

    fn animations_active(&self) -> bool {
        self.scroller.is_animating() || self.counters.is_animating()
    }

    fn run_due(&mut self, now: Instant) {
        self.form.poll(&mut self.page, now);

        if self.next_frame.is_some_and(|at| at <= now) {
            self.frame_tick(now);
        }

        if let Some((at, outcome)) = self.submit_due {
            if at <= now {
                self.submit_due = None;
                self.form.settle(&mut self.page, outcome);
                self.feedback_due = Some(now + self.feedback_timeout);
            }
        }

        if let Some(at) = self.feedback_due {
            if at <= now {
                self.feedback_due = None;
                self.form.clear_feedback(&mut self.page);
            }
        }

        self.flush();
    }

    fn frame_tick(&mut self, now: Instant) {
        if self.scroller.update(&mut self.page, now) {
            self.after_scroll(now);
        }
        self.counters.tick(&mut self.page, now);
        self.next_frame = self
            .animations_active()
            .then(|| now + self.frame_interval);
    }

    fn click(&mut self, target: &str, now: Instant) {
        let Some(element) = self.resolve(target) else {
            debug!("click target not found: {target}");
            return;
        };
        if self.page.element(element).is_disabled() {
            return;
        }

        if self.page.element(element).id() == Some(menu::TOGGLE_ID) {
            self.menu.toggle(&mut self.page);
            return;
        }

        if self.page.element(element).id() == Some(header::BACK_TO_TOP_ID) {
            self.scroller.to_top(&self.page, now);
            return;
        }

        let href = self.page.element(element).attr("href").map(str::to_string);
        if let Some(href) = href.filter(|h| h.starts_with('#')) {
            self.scroller.anchor_clicked(&mut self.page, &href, now);
            if self.page.element(element).has_class(menu::LINK_CLASS) {
                self.menu.link_clicked(&mut self.page);
            }
            return;
        }

        if self.page.element(element).has_class(form::SUBMIT_CLASS) {
            self.submit(SubmitOutcome::default(), now);
            return;
        }

        debug!("click on inert element: {target}");
    }

    fn submit(&mut self, outcome: SubmitOutcome, now: Instant) {
        if self.form.submit(&mut self.page) == SubmitDecision::Started {
            self.submit_due = Some((now + self.submit_delay, outcome));
            info!(
                delay_ms = self.submit_delay.as_millis() as u64,
                "submission in flight"
            );
        }
    }

    /// Scroll offset changed: recompute derived state behind the throttle
    /// gate, and always re-check intersections (the observer is not rate
    /// limited).
    fn after_scroll(&mut self, now: Instant) {
        if self.scroll_gate.try_admit(now) {
            self.reactor.update(&mut self.page);
            self.nav.update(&mut self.page);
        }
        self.process_intersections();
    }

    fn process_intersections(&mut self) {
        let now = self.clock.now();
        for (element, entered) in self.counter_watch.evaluate(&self.page) {
            if entered {
                // One shot per element: stop observing before animating.
                self.counter_watch.unobserve(element);
                self.counters.trigger(&self.page, element, now);
            }
        }
        if let Some(section) = self.marquee_section {
            for (element, entered) in self.marquee_watch.evaluate(&self.page) {
                if element == section {
                    self.marquee.set_intersecting(&mut self.page, entered);
                }
            }
        }
    }

    fn is_marquee_target(&self, target: &str) -> bool {
        self.marquee_section
            .is_some_and(|section| self.resolve(target) == Some(section))
    }

    /// Resolve a scenario target: element id first, then class name.
    fn resolve(&self, target: &str) -> Option<ElementId> {
        self.page
            .find_id(target)
            .or_else(|| self.page.first_by_class(target))
    }

    fn flush(&mut self) {
        let at_ms = self.clock.elapsed_ms();
        for change in self.page.take_mutations() {
            self.trace.record(at_ms, change);
        }
    }
}
