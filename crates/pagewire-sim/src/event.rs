//! Events a scenario can deliver to the engine.

use serde::{Deserialize, Serialize};

use pagewire_core::controller::SubmitOutcome;

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Enter,
}

/// One interaction delivered to the page.
///
/// Targets name an element id, falling back to a class name when no id
/// matches; unknown targets are soft no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Click an element: the menu trigger, an anchor link, the back-to-top
    /// control or the submit button.
    Click { target: String },
    /// Press a key. Only Escape carries behavior (it closes the menu).
    KeyDown { key: Key },
    /// Jump the scroll offset, as a user dragging the scrollbar would.
    ScrollTo { y: f64 },
    /// Pointer enters an element.
    MouseEnter { target: String },
    /// Pointer leaves an element.
    MouseLeave { target: String },
    /// Type into a form field, replacing its value.
    Input { target: String, value: String },
    /// Focus leaves a form field.
    Blur { target: String },
    /// Submit the contact form. The outcome models the network's answer.
    Submit {
        #[serde(default)]
        outcome: SubmitOutcome,
    },
}

impl PageEvent {
    /// The element a targeted event addresses, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Click { target }
            | Self::MouseEnter { target }
            | Self::MouseLeave { target }
            | Self::Input { target, .. }
            | Self::Blur { target } => Some(target),
            Self::KeyDown { .. } | Self::ScrollTo { .. } | Self::Submit { .. } => None,
        }
    }
}
