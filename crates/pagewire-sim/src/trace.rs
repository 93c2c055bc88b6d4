//! Observable-effect trace.
//!
//! Every page mutation the engine applies is recorded with its simulated
//! timestamp, so a run can be asserted on, diffed, or printed.

use serde::Serialize;

use pagewire_core::{Mutation, Page};

#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub change: Mutation,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at_ms: u64, change: Mutation) {
        self.entries.push(TraceEntry { at_ms, change });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable lines, one per effect.
    pub fn render(&self, page: &Page) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("[{:>6}ms] {}", entry.at_ms, entry.change.describe(page)))
            .collect()
    }

    /// Whether any entry matches a predicate, for test assertions.
    pub fn any(&self, predicate: impl Fn(&TraceEntry) -> bool) -> bool {
        self.entries.iter().any(predicate)
    }
}
