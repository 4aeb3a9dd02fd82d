//! Planner configuration, loaded from JSON. Every field has a default, so an
//! empty object (`{}`) is a complete config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::model::Priority;
use crate::timeline::TimelineConfig;

pub const DEFAULT_RETURN_NOTE: &str = "Moved back from schedule";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConfig {
    /// Priority given to a scheduled event dragged back to the unassigned pool.
    pub return_priority: Priority,
    /// Note attached to a visit dragged back to the unassigned pool.
    pub return_note: String,
    pub timeline: TimelineConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            return_priority: Priority::Medium,
            return_note: DEFAULT_RETURN_NOTE.to_string(),
            timeline: TimelineConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlannerConfig =
            serde_json::from_str(json).map_err(|e| PlannerError::Config(e.to_string()))?;
        config.timeline.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PlannerError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "Loaded planner config");
        Ok(config)
    }
}
