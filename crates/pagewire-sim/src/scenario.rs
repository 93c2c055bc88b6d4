//! Scripted interaction timelines.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pagewire_core::{Error, Result};

use crate::event::PageEvent;

/// An ordered, timestamped list of interactions to play against a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Milliseconds from the start of the run.
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: PageEvent,
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario: Scenario = toml::from_str(&content)
            .map_err(|e| Error::Scenario(format!("{}: {e}", path.display())))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Steps must be ordered by time.
    pub fn validate(&self) -> Result<()> {
        for pair in self.steps.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(Error::Scenario(format!(
                    "steps out of order: {}ms after {}ms",
                    pair[1].at_ms, pair[0].at_ms
                )));
            }
        }
        Ok(())
    }
}
