//! Error types for visit-planner operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// Text that is not a two-digit `HH:MM` wall-clock time.
    #[error("Invalid time: '{0}' (expected HH:MM)")]
    InvalidTime(String),

    /// A minute-of-day value outside 0..=1439.
    #[error("Minute value {0} is outside the day (0-1439)")]
    MinutesOutOfRange(u32),

    /// An event whose end does not come after its start.
    #[error("Invalid interval for event '{event_id}': {start}-{end}")]
    InvalidInterval {
        event_id: String,
        start: String,
        end: String,
    },

    /// A placement or cascade that would end after 23:59.
    #[error("Event '{event_id}' would end {end_minutes} minutes after midnight, past the end of the day")]
    DayOverflow { event_id: String, end_minutes: u32 },

    #[error("Unknown unassigned visit: {0}")]
    UnknownVisit(String),

    #[error("Unknown schedule event: {0}")]
    UnknownEvent(String),

    #[error("Unknown measure: {0}")]
    UnknownMeasure(u32),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
