//! Interaction controllers.
//!
//! Each controller owns one behavior of the page and applies its side
//! effects as class/attribute/style/text mutations. Missing elements are
//! soft no-ops throughout; a page without a marquee simply has no marquee
//! behavior.

pub mod counter;
pub mod form;
pub mod header;
pub mod marquee;
pub mod menu;
pub mod nav;
pub mod smooth;

pub use counter::CounterAnimator;
pub use form::{FormController, SubmitDecision, SubmitOutcome};
pub use header::ScrollReactor;
pub use marquee::MarqueeController;
pub use menu::MenuController;
pub use nav::NavHighlighter;
pub use smooth::PageScroller;
