//! Mobile menu toggle.
//!
//! A two-state machine (closed/open) whose state is mirrored onto the
//! page: "active" classes on the trigger and the panel, `aria-expanded`
//! on the trigger, `aria-hidden` on the panel, and the body scroll lock.

use crate::page::Page;

/// Element id of the menu trigger button.
pub const TOGGLE_ID: &str = "menuToggle";
/// Element id of the slide-out menu panel.
pub const PANEL_ID: &str = "mobileMenu";
/// Class carried by links inside the mobile menu.
pub const LINK_CLASS: &str = "mobile-nav-link";

const ACTIVE: &str = "active";

#[derive(Debug, Clone, Default)]
pub struct MenuController {
    is_open: bool,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Flip the menu state and synchronize every mirrored effect.
    /// Does nothing when the trigger or panel is missing from the page.
    pub fn toggle(&mut self, page: &mut Page) {
        let (Some(toggle), Some(panel)) = (page.find_id(TOGGLE_ID), page.find_id(PANEL_ID)) else {
            return;
        };

        self.is_open = !self.is_open;
        let open = self.is_open;

        page.set_class(toggle, ACTIVE, open);
        page.set_class(panel, ACTIVE, open);
        page.set_attr(toggle, "aria-expanded", bool_attr(open));
        page.set_attr(panel, "aria-hidden", bool_attr(!open));
        page.set_scroll_lock(open);
    }

    /// Escape closes an open menu and never opens a closed one.
    pub fn escape(&mut self, page: &mut Page) {
        if self.is_open {
            self.toggle(page);
        }
    }

    /// Following a link inside the open menu closes it.
    pub fn link_clicked(&mut self, page: &mut Page) {
        if self.is_open {
            self.toggle(page);
        }
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSpec;

    fn menu_page() -> Page {
        let spec: PageSpec = toml::from_str(
            r#"
            viewport_height = 800.0

            [[elements]]
            tag = "button"
            id = "menuToggle"

            [[elements]]
            tag = "nav"
            id = "mobileMenu"
            [elements.attrs]
            aria-hidden = "true"
            "#,
        )
        .unwrap();
        spec.build().unwrap()
    }

    #[test]
    fn test_toggle_cycles_and_synchronizes() {
        let mut page = menu_page();
        let mut menu = MenuController::new();
        let toggle = page.find_id(TOGGLE_ID).unwrap();
        let panel = page.find_id(PANEL_ID).unwrap();

        menu.toggle(&mut page);
        assert!(menu.is_open());
        assert!(page.element(toggle).has_class("active"));
        assert!(page.element(panel).has_class("active"));
        assert_eq!(page.element(toggle).attr("aria-expanded"), Some("true"));
        assert_eq!(page.element(panel).attr("aria-hidden"), Some("false"));
        assert!(page.is_scroll_locked());

        menu.toggle(&mut page);
        assert!(!menu.is_open());
        assert!(!page.element(toggle).has_class("active"));
        assert!(!page.element(panel).has_class("active"));
        assert_eq!(page.element(toggle).attr("aria-expanded"), Some("false"));
        assert_eq!(page.element(panel).attr("aria-hidden"), Some("true"));
        assert!(!page.is_scroll_locked());
    }

    #[test]
    fn test_repeated_cycles_stay_consistent() {
        let mut page = menu_page();
        let mut menu = MenuController::new();
        for _ in 0..5 {
            menu.toggle(&mut page);
            menu.toggle(&mut page);
        }
        assert!(!menu.is_open());
        assert!(!page.is_scroll_locked());
    }

    #[test]
    fn test_escape_only_closes() {
        let mut page = menu_page();
        let mut menu = MenuController::new();

        menu.escape(&mut page);
        assert!(!menu.is_open());
        assert!(page.take_mutations().is_empty());

        menu.toggle(&mut page);
        menu.escape(&mut page);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_link_click_only_closes() {
        let mut page = menu_page();
        let mut menu = MenuController::new();
        menu.link_clicked(&mut page);
        assert!(!menu.is_open());
        menu.toggle(&mut page);
        menu.link_clicked(&mut page);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_missing_elements_noop() {
        let spec: PageSpec = toml::from_str("viewport_height = 800.0").unwrap();
        let mut page = spec.build().unwrap();
        let mut menu = MenuController::new();
        menu.toggle(&mut page);
        assert!(!menu.is_open());
        assert!(page.take_mutations().is_empty());
    }
}
