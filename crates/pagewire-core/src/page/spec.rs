//! Serde description of a page, loadable from TOML.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Element, Page};

/// Declarative page description: a viewport and a list of elements in
/// document order. `page_height` may be omitted, in which case it is the
/// furthest extent of any element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    pub viewport_height: f64,
    #[serde(default)]
    pub page_height: Option<f64>,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
}

impl PageSpec {
    /// Load a page description from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::Error::Page(format!("{}: {e}", path.display())))
    }

    /// Materialize the page.
    pub fn build(&self) -> crate::Result<Page> {
        if self.viewport_height <= 0.0 {
            return Err(crate::Error::Page(
                "viewport_height must be positive".to_string(),
            ));
        }
        let elements: Vec<Element> = self
            .elements
            .iter()
            .map(|spec| Element {
                tag: spec.tag.clone(),
                id: spec.id.clone(),
                classes: spec.classes.clone(),
                attrs: spec.attrs.clone(),
                styles: Default::default(),
                text: spec.text.clone(),
                value: spec.value.clone(),
                disabled: spec.disabled,
                top: spec.top,
                height: spec.height,
            })
            .collect();
        let extent = elements
            .iter()
            .map(|e| e.top + e.height)
            .fold(0.0_f64, f64::max);
        let page_height = self.page_height.unwrap_or(extent).max(self.viewport_height);
        Page::from_parts(elements, page_height, self.viewport_height)
    }
}
