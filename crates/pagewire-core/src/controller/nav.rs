//! Active-section navigation highlighting.
//!
//! A section is "current" when the probe position (scroll offset plus a
//! fixed lead) falls inside its vertical span. Every nav link pointing at
//! the current section gets the active class and `aria-current="page"`;
//! all other links are cleared.

use crate::config::NavConfig;
use crate::page::{ElementId, Page};

/// Classes carried by navigation links, desktop and mobile.
pub const LINK_CLASSES: [&str; 2] = ["nav-link", "mobile-nav-link"];

const ACTIVE: &str = "active";
const ARIA_CURRENT: &str = "aria-current";

#[derive(Debug, Clone)]
pub struct NavHighlighter {
    probe_offset: f64,
}

impl NavHighlighter {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            probe_offset: config.probe_offset,
        }
    }

    /// Id of the section whose span contains the probe position.
    /// When spans overlap the last section in document order wins; that is
    /// an accepted artifact of malformed geometry, not corrected here.
    pub fn current_section(&self, page: &Page) -> Option<String> {
        let probe = page.scroll_y() + self.probe_offset;
        let mut current = None;
        for id in page.by_tag("section") {
            let element = page.element(id);
            let Some(name) = element.id() else { continue };
            let (top, bottom) = element.span();
            if probe >= top && probe < bottom {
                current = Some(name.to_string());
            }
        }
        current
    }

    /// Recompute link highlighting. When no section contains the probe the
    /// previous highlight is left untouched.
    pub fn update(&self, page: &mut Page) {
        let Some(current) = self.current_section(page) else {
            return;
        };

        for link in self.links(page) {
            let matches = link_target(page, link).is_some_and(|t| t == current);
            if matches {
                page.add_class(link, ACTIVE);
                page.set_attr(link, ARIA_CURRENT, "page");
            } else {
                page.remove_class(link, ACTIVE);
                page.remove_attr(link, ARIA_CURRENT);
            }
        }
    }

    fn links(&self, page: &Page) -> Vec<ElementId> {
        page.iter()
            .filter(|&id| {
                LINK_CLASSES
                    .iter()
                    .any(|class| page.element(id).has_class(class))
            })
            .collect()
    }
}

/// Section id a nav link points at: its `data-section` attribute, else the
/// fragment of its `href`.
fn link_target(page: &Page, link: ElementId) -> Option<String> {
    let element = page.element(link);
    if let Some(section) = element.attr("data-section") {
        return Some(section.to_string());
    }
    element
        .attr("href")
        .and_then(|href| href.strip_prefix('#'))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSpec;

    fn nav_page() -> Page {
        let spec: PageSpec = toml::from_str(
            r##"
            viewport_height = 800.0
            page_height = 2000.0

            [[elements]]
            tag = "a"
            classes = ["nav-link"]
            [elements.attrs]
            href = "#a"

            [[elements]]
            tag = "a"
            classes = ["nav-link"]
            [elements.attrs]
            data-section = "b"

            [[elements]]
            tag = "section"
            id = "a"
            top = 0.0
            height = 300.0

            [[elements]]
            tag = "section"
            id = "b"
            top = 300.0
            height = 300.0
            "##,
        )
        .unwrap();
        spec.build().unwrap()
    }

    #[test]
    fn test_probe_selects_section() {
        let mut page = nav_page();
        let nav = NavHighlighter::new(&NavConfig::default());

        // scroll 250 -> probe 350, inside [300, 600)
        page.set_scroll_y(250.0);
        assert_eq!(nav.current_section(&page).as_deref(), Some("b"));

        nav.update(&mut page);
        let link_a = page.by_class("nav-link")[0];
        let link_b = page.by_class("nav-link")[1];
        assert!(!page.element(link_a).has_class("active"));
        assert!(page.element(link_b).has_class("active"));
        assert_eq!(page.element(link_b).attr("aria-current"), Some("page"));
    }

    #[test]
    fn test_highlight_moves_between_sections() {
        let mut page = nav_page();
        let nav = NavHighlighter::new(&NavConfig::default());
        let link_a = page.by_class("nav-link")[0];
        let link_b = page.by_class("nav-link")[1];

        page.set_scroll_y(0.0); // probe 100, inside "a"
        nav.update(&mut page);
        assert!(page.element(link_a).has_class("active"));

        page.set_scroll_y(250.0); // probe 350, inside "b"
        nav.update(&mut page);
        assert!(!page.element(link_a).has_class("active"));
        assert_eq!(page.element(link_a).attr("aria-current"), None);
        assert!(page.element(link_b).has_class("active"));
    }

    #[test]
    fn test_overlapping_spans_last_wins() {
        let spec: PageSpec = toml::from_str(
            r#"
            viewport_height = 800.0
            page_height = 2000.0

            [[elements]]
            tag = "section"
            id = "first"
            top = 0.0
            height = 500.0

            [[elements]]
            tag = "section"
            id = "second"
            top = 0.0
            height = 500.0
            "#,
        )
        .unwrap();
        let page = spec.build().unwrap();
        let nav = NavHighlighter::new(&NavConfig::default());
        assert_eq!(nav.current_section(&page).as_deref(), Some("second"));
    }

    #[test]
    fn test_gap_keeps_previous_highlight() {
        let spec: PageSpec = toml::from_str(
            r##"
            viewport_height = 800.0
            page_height = 3000.0

            [[elements]]
            tag = "a"
            classes = ["nav-link"]
            [elements.attrs]
            href = "#a"

            [[elements]]
            tag = "section"
            id = "a"
            top = 0.0
            height = 300.0
            "##,
        )
        .unwrap();
        let mut page = spec.build().unwrap();
        let nav = NavHighlighter::new(&NavConfig::default());
        let link = page.by_class("nav-link")[0];

        nav.update(&mut page); // probe 100 inside "a"
        assert!(page.element(link).has_class("active"));

        // probe 1100: no section contains it; highlight is left as-is
        page.set_scroll_y(1000.0);
        nav.update(&mut page);
        assert!(page.element(link).has_class("active"));
    }

    #[test]
    fn test_section_without_id_ignored() {
        let spec: PageSpec = toml::from_str(
            r#"
            viewport_height = 800.0

            [[elements]]
            tag = "section"
            top = 0.0
            height = 400.0
            "#,
        )
        .unwrap();
        let page = spec.build().unwrap();
        let nav = NavHighlighter::new(&NavConfig::default());
        assert_eq!(nav.current_section(&page), None);
    }
}
