//! In-memory page model.
//!
//! A flat arena of elements in document order, with the handful of
//! document-level facts the interaction controllers need: scroll position,
//! viewport height, the location fragment, focus and the body scroll lock.
//! There is no layout engine; geometry is whatever the page definition
//! declares. Every observable mutation is journaled so a caller can turn
//! state changes into a trace.

mod spec;

pub use spec::{ElementSpec, PageSpec};

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Handle to an element in the page arena. Index order is document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    disabled: bool,
    top: f64,
    height: f64,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// All attributes, sorted by name for stable output.
    pub fn attrs(&self) -> Vec<(&str, &str)> {
        let mut attrs: Vec<(&str, &str)> = self
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        attrs.sort_unstable();
        attrs
    }

    pub fn style(&self, prop: &str) -> Option<&str> {
        self.styles.get(prop).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Vertical span `[top, top + height)`.
    pub fn span(&self) -> (f64, f64) {
        (self.top, self.top + self.height)
    }
}

/// One observable side effect applied to the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Mutation {
    ClassAdded { element: ElementId, class: String },
    ClassRemoved { element: ElementId, class: String },
    AttrSet { element: ElementId, name: String, value: String },
    AttrRemoved { element: ElementId, name: String },
    StyleSet { element: ElementId, prop: String, value: String },
    StyleRemoved { element: ElementId, prop: String },
    TextSet { element: ElementId, text: String },
    ValueSet { element: ElementId, value: String },
    DisabledSet { element: ElementId, disabled: bool },
    Scrolled { y: f64 },
    ScrollLockSet { locked: bool },
    FragmentSet { fragment: String },
    Focused { element: ElementId },
}

impl Mutation {
    /// Human-readable one-liner, resolving element handles against the page.
    pub fn describe(&self, page: &Page) -> String {
        let label = |id: &ElementId| page.label(*id);
        match self {
            Self::ClassAdded { element, class } => format!("{} +.{}", label(element), class),
            Self::ClassRemoved { element, class } => format!("{} -.{}", label(element), class),
            Self::AttrSet { element, name, value } => {
                format!("{} [{}={}]", label(element), name, value)
            }
            Self::AttrRemoved { element, name } => format!("{} [{}] removed", label(element), name),
            Self::StyleSet { element, prop, value } => {
                format!("{} style {}: {}", label(element), prop, value)
            }
            Self::StyleRemoved { element, prop } => {
                format!("{} style {} cleared", label(element), prop)
            }
            Self::TextSet { element, text } => format!("{} text \"{}\"", label(element), text),
            Self::ValueSet { element, value } => format!("{} value \"{}\"", label(element), value),
            Self::DisabledSet { element, disabled } => {
                format!("{} disabled={}", label(element), disabled)
            }
            Self::Scrolled { y } => format!("scroll -> {y:.0}"),
            Self::ScrollLockSet { locked } => format!("body scroll lock={locked}"),
            Self::FragmentSet { fragment } => format!("fragment -> #{fragment}"),
            Self::Focused { element } => format!("focus -> {}", label(element)),
        }
    }
}

/// The page: elements plus document-level state.
#[derive(Debug, Clone)]
pub struct Page {
    elements: Vec<Element>,
    id_index: HashMap<String, ElementId>,
    scroll_y: f64,
    page_height: f64,
    viewport_height: f64,
    scroll_locked: bool,
    fragment: Option<String>,
    focused: Option<ElementId>,
    journal: Vec<Mutation>,
}

impl Page {
    pub(crate) fn from_parts(
        elements: Vec<Element>,
        page_height: f64,
        viewport_height: f64,
    ) -> crate::Result<Self> {
        let mut id_index = HashMap::new();
        for (idx, element) in elements.iter().enumerate() {
            if let Some(id) = &element.id {
                if id_index.insert(id.clone(), ElementId(idx)).is_some() {
                    return Err(crate::Error::Page(format!("duplicate element id: {id}")));
                }
            }
        }
        Ok(Self {
            elements,
            id_index,
            scroll_y: 0.0,
            page_height,
            viewport_height,
            scroll_locked: false,
            fragment: None,
            focused: None,
            journal: Vec::new(),
        })
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All element handles in document order.
    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(ElementId)
    }

    /// Display label for trace output: the id when present, else tag#index.
    pub fn label(&self, id: ElementId) -> String {
        let element = self.element(id);
        match element.id() {
            Some(name) => format!("#{name}"),
            None => format!("{}#{}", element.tag(), id.0),
        }
    }

    pub fn find_id(&self, id: &str) -> Option<ElementId> {
        self.id_index.get(id).copied()
    }

    /// All elements carrying `class`, in document order.
    pub fn by_class(&self, class: &str) -> Vec<ElementId> {
        self.iter()
            .filter(|&id| self.element(id).has_class(class))
            .collect()
    }

    pub fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.iter().find(|&id| self.element(id).has_class(class))
    }

    pub fn by_tag(&self, tag: &str) -> Vec<ElementId> {
        self.iter()
            .filter(|&id| self.element(id).tag() == tag)
            .collect()
    }

    pub fn first_by_tag(&self, tag: &str) -> Option<ElementId> {
        self.iter().find(|&id| self.element(id).tag() == tag)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.page_height - self.viewport_height).max(0.0)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Set the scroll offset, clamped to the valid range.
    /// Returns the offset actually applied.
    pub fn set_scroll_y(&mut self, y: f64) -> f64 {
        let clamped = y.clamp(0.0, self.max_scroll());
        if clamped != self.scroll_y {
            self.scroll_y = clamped;
            self.journal.push(Mutation::Scrolled { y: clamped });
        }
        clamped
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if !self.elements[id.0].has_class(class) {
            self.elements[id.0].classes.push(class.to_string());
            self.journal.push(Mutation::ClassAdded {
                element: id,
                class: class.to_string(),
            });
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        let classes = &mut self.elements[id.0].classes;
        if let Some(pos) = classes.iter().position(|c| c == class) {
            classes.remove(pos);
            self.journal.push(Mutation::ClassRemoved {
                element: id,
                class: class.to_string(),
            });
        }
    }

    /// Add or remove `class` to match `present`.
    pub fn set_class(&mut self, id: ElementId, class: &str, present: bool) {
        if present {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        let previous = self.elements[id.0]
            .attrs
            .insert(name.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.journal.push(Mutation::AttrSet {
                element: id,
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    }

    pub fn remove_attr(&mut self, id: ElementId, name: &str) {
        if self.elements[id.0].attrs.remove(name).is_some() {
            self.journal.push(Mutation::AttrRemoved {
                element: id,
                name: name.to_string(),
            });
        }
    }

    pub fn set_style(&mut self, id: ElementId, prop: &str, value: &str) {
        let previous = self.elements[id.0]
            .styles
            .insert(prop.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.journal.push(Mutation::StyleSet {
                element: id,
                prop: prop.to_string(),
                value: value.to_string(),
            });
        }
    }

    pub fn remove_style(&mut self, id: ElementId, prop: &str) {
        if self.elements[id.0].styles.remove(prop).is_some() {
            self.journal.push(Mutation::StyleRemoved {
                element: id,
                prop: prop.to_string(),
            });
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if self.elements[id.0].text != text {
            self.elements[id.0].text = text.to_string();
            self.journal.push(Mutation::TextSet {
                element: id,
                text: text.to_string(),
            });
        }
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        if self.elements[id.0].value != value {
            self.elements[id.0].value = value.to_string();
            self.journal.push(Mutation::ValueSet {
                element: id,
                value: value.to_string(),
            });
        }
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if self.elements[id.0].disabled != disabled {
            self.elements[id.0].disabled = disabled;
            self.journal.push(Mutation::DisabledSet {
                element: id,
                disabled,
            });
        }
    }

    pub fn set_scroll_lock(&mut self, locked: bool) {
        if self.scroll_locked != locked {
            self.scroll_locked = locked;
            self.journal.push(Mutation::ScrollLockSet { locked });
        }
    }

    pub fn set_fragment(&mut self, fragment: &str) {
        if self.fragment.as_deref() != Some(fragment) {
            self.fragment = Some(fragment.to_string());
            self.journal.push(Mutation::FragmentSet {
                fragment: fragment.to_string(),
            });
        }
    }

    pub fn set_focus(&mut self, id: ElementId) {
        if self.focused != Some(id) {
            self.focused = Some(id);
            self.journal.push(Mutation::Focused { element: id });
        }
    }

    /// Drain the journaled mutations accumulated since the last call.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> Page {
        let spec: PageSpec = toml::from_str(
            r#"
            viewport_height = 800.0

            [[elements]]
            tag = "header"
            id = "siteHeader"
            classes = ["site-header"]
            top = 0.0
            height = 80.0

            [[elements]]
            tag = "section"
            id = "hero"
            top = 0.0
            height = 600.0

            [[elements]]
            tag = "section"
            id = "services"
            top = 600.0
            height = 900.0
            "#,
        )
        .unwrap();
        spec.build().unwrap()
    }

    #[test]
    fn test_lookup_by_id_and_tag() {
        let page = sample_page();
        assert!(page.find_id("hero").is_some());
        assert!(page.find_id("missing").is_none());
        assert_eq!(page.by_tag("section").len(), 2);
        assert_eq!(page.first_by_tag("header"), page.find_id("siteHeader"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let spec: PageSpec = toml::from_str(
            r#"
            viewport_height = 800.0

            [[elements]]
            tag = "div"
            id = "x"

            [[elements]]
            tag = "div"
            id = "x"
            "#,
        )
        .unwrap();
        assert!(spec.build().is_err());
    }

    #[test]
    fn test_scroll_clamped_to_page() {
        let mut page = sample_page();
        // page height derived from the furthest element: 600 + 900 = 1500
        assert_eq!(page.max_scroll(), 700.0);
        assert_eq!(page.set_scroll_y(10_000.0), 700.0);
        assert_eq!(page.set_scroll_y(-5.0), 0.0);
    }

    #[test]
    fn test_journal_records_only_changes() {
        let mut page = sample_page();
        let header = page.find_id("siteHeader").unwrap();
        page.add_class(header, "scrolled");
        page.add_class(header, "scrolled"); // idempotent, not journaled
        page.remove_class(header, "scrolled");
        page.remove_class(header, "scrolled");
        page.set_attr(header, "aria-hidden", "true");
        page.set_attr(header, "aria-hidden", "true");
        let mutations = page.take_mutations();
        assert_eq!(mutations.len(), 3);
        assert!(page.take_mutations().is_empty());
    }

    #[test]
    fn test_label_prefers_id() {
        let page = sample_page();
        let header = page.find_id("siteHeader").unwrap();
        assert_eq!(page.label(header), "#siteHeader");
    }
}
