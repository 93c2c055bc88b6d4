//! Contact form validation and simulated submission.
//!
//! Fields validate on blur, and while typing after a debounce quiet
//! period. Submission validates everything, focuses the first failure, or
//! enters an in-flight state that the environment settles after the
//! configured delay with a success or failure outcome.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::FormConfig;
use crate::limiter::Debouncer;
use crate::page::{ElementId, Page};

/// Element id of the contact form.
pub const FORM_ID: &str = "contactForm";
/// Class of the submit button.
pub const SUBMIT_CLASS: &str = "btn-submit";
/// Class of the submission feedback element.
pub const FEEDBACK_CLASS: &str = "form-feedback";

const REQUIRED_MESSAGE: &str = "This field is required";
const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again.";

/// Outcome of the simulated submission round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    #[default]
    Success,
    Failure,
}

/// What a submit attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// All fields valid; the in-flight state was entered.
    Started,
    /// At least one field failed; the first failure was focused.
    Invalid,
    /// A submission is already in flight (the button is disabled).
    Ignored,
}

#[derive(Debug, Clone)]
struct FieldRule {
    pattern: Regex,
    message: &'static str,
}

#[derive(Debug)]
pub struct FormController {
    rules: HashMap<&'static str, FieldRule>,
    debounce_wait: Duration,
    debouncers: HashMap<ElementId, Debouncer<()>>,
    submitting: bool,
}

impl FormController {
    pub fn new(config: &FormConfig) -> crate::Result<Self> {
        let mut rules = HashMap::new();
        for (field, pattern, message) in [
            (
                "name",
                r"^[a-zA-Z\s]{2,50}$",
                "Please enter a valid name (2-50 characters, letters only)",
            ),
            (
                "email",
                r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
                "Please enter a valid email address",
            ),
            (
                "message",
                r"^.{10,500}$",
                "Message must be between 10-500 characters",
            ),
        ] {
            let pattern = Regex::new(pattern).map_err(|source| crate::Error::Pattern {
                field: field.to_string(),
                source,
            })?;
            rules.insert(field, FieldRule { pattern, message });
        }
        Ok(Self {
            rules,
            debounce_wait: Duration::from_millis(config.debounce_ms),
            debouncers: HashMap::new(),
            submitting: false,
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The form's input and textarea fields in document order. Empty when
    /// the page carries no contact form at all.
    pub fn fields(&self, page: &Page) -> Vec<ElementId> {
        if page.find_id(FORM_ID).is_none() {
            return Vec::new();
        }
        page.iter()
            .filter(|&id| {
                let tag = page.element(id).tag();
                tag == "input" || tag == "textarea"
            })
            .collect()
    }

    /// Whether `element` is one of the form's fields.
    pub fn is_field(&self, page: &Page, element: ElementId) -> bool {
        self.fields(page).contains(&element)
    }

    /// Store a typed value and schedule the debounced revalidation.
    pub fn input(&mut self, page: &mut Page, field: ElementId, value: &str, now: Instant) {
        if !self.is_field(page, field) {
            return;
        }
        page.set_value(field, value);
        self.debouncers
            .entry(field)
            .or_insert_with(|| Debouncer::new(self.debounce_wait))
            .call((), now);
    }

    /// Leaving a field validates it immediately.
    pub fn blur(&mut self, page: &mut Page, field: ElementId) {
        if self.is_field(page, field) {
            self.validate_field(page, field);
        }
    }

    /// Earliest pending revalidation deadline, for scheduler integration.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncers.values().filter_map(Debouncer::deadline).min()
    }

    /// Fire due debounced revalidations. Fields that are untouched and
    /// empty are left alone so a stray keystroke-then-delete does not
    /// flag a pristine form.
    pub fn poll(&mut self, page: &mut Page, now: Instant) {
        let due: Vec<ElementId> = self
            .debouncers
            .iter_mut()
            .filter_map(|(&field, debouncer)| debouncer.poll(now).map(|()| field))
            .collect();
        for field in due {
            let element = page.element(field);
            if element.has_class("error") || !element.value().trim().is_empty() {
                self.validate_field(page, field);
            }
        }
    }

    /// Validate one field, applying the error or valid treatment.
    pub fn validate_field(&self, page: &mut Page, field: ElementId) -> bool {
        let element = page.element(field);
        let name = element.attr("name").unwrap_or_default().to_string();
        let value = element.value().trim().to_string();

        if value.is_empty() {
            self.show_error(page, field, &name, REQUIRED_MESSAGE);
            return false;
        }

        if let Some(rule) = self.rules.get(name.as_str()) {
            if !rule.pattern.is_match(&value) {
                self.show_error(page, field, &name, rule.message);
                return false;
            }
        }

        self.show_success(page, field, &name);
        true
    }

    /// Validate everything and either start the simulated submission or
    /// focus the first failing field.
    pub fn submit(&mut self, page: &mut Page) -> SubmitDecision {
        if self.submitting {
            return SubmitDecision::Ignored;
        }
        let fields = self.fields(page);
        if fields.is_empty() {
            return SubmitDecision::Ignored;
        }

        let mut all_valid = true;
        for &field in &fields {
            // Validate every field so each shows its own message.
            all_valid &= self.validate_field(page, field);
        }

        if !all_valid {
            if let Some(&first) = fields
                .iter()
                .find(|&&f| page.element(f).has_class("error"))
            {
                page.set_focus(first);
            }
            debug!("form submit rejected by validation");
            return SubmitDecision::Invalid;
        }

        if let Some(button) = page.first_by_class(SUBMIT_CLASS) {
            page.add_class(button, "loading");
            page.set_disabled(button, true);
        }
        self.submitting = true;
        info!("form submission started");
        SubmitDecision::Started
    }

    /// Complete the in-flight submission with the environment's outcome.
    pub fn settle(&mut self, page: &mut Page, outcome: SubmitOutcome) {
        if !self.submitting {
            return;
        }
        self.submitting = false;

        if let Some(feedback) = page.first_by_class(FEEDBACK_CLASS) {
            match outcome {
                SubmitOutcome::Success => {
                    page.set_text(feedback, SUCCESS_MESSAGE);
                    page.remove_class(feedback, "error");
                    page.add_class(feedback, "success");
                    page.add_class(feedback, "show");
                }
                SubmitOutcome::Failure => {
                    page.set_text(feedback, FAILURE_MESSAGE);
                    page.remove_class(feedback, "success");
                    page.add_class(feedback, "error");
                    page.add_class(feedback, "show");
                }
            }
        }

        if outcome == SubmitOutcome::Success {
            self.reset(page);
        } else {
            info!("form submission failed");
        }

        if let Some(button) = page.first_by_class(SUBMIT_CLASS) {
            page.remove_class(button, "loading");
            page.set_disabled(button, false);
        }
    }

    /// Hide the submission feedback once its display window elapses.
    pub fn clear_feedback(&self, page: &mut Page) {
        if let Some(feedback) = page.first_by_class(FEEDBACK_CLASS) {
            page.remove_class(feedback, "success");
            page.remove_class(feedback, "error");
            page.remove_class(feedback, "show");
        }
    }

    fn reset(&mut self, page: &mut Page) {
        for field in self.fields(page) {
            page.set_value(field, "");
            page.remove_class(field, "valid");
            page.remove_class(field, "error");
            page.set_attr(field, "aria-invalid", "false");
        }
        for debouncer in self.debouncers.values_mut() {
            debouncer.cancel();
        }
    }

    fn show_error(&self, page: &mut Page, field: ElementId, name: &str, message: &str) {
        page.add_class(field, "error");
        page.remove_class(field, "valid");
        page.set_attr(field, "aria-invalid", "true");
        if let Some(feedback) = page.find_id(&format!("{name}-error")) {
            page.set_text(feedback, message);
            page.add_class(feedback, "show");
        }
    }

    fn show_success(&self, page: &mut Page, field: ElementId, name: &str) {
        page.remove_class(field, "error");
        page.add_class(field, "valid");
        page.set_attr(field, "aria-invalid", "false");
        if let Some(feedback) = page.find_id(&format!("{name}-error")) {
            page.set_text(feedback, "");
            page.remove_class(feedback, "show");
        }
    }
}
