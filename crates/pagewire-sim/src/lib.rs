pub mod clock;
pub mod engine;
pub mod event;
pub mod observer;
pub mod scenario;
pub mod trace;

pub use clock::SimClock;
pub use engine::Engine;
pub use event::{Key, PageEvent};
pub use observer::IntersectionTracker;
pub use scenario::{Scenario, Step};
pub use trace::{Trace, TraceEntry};
