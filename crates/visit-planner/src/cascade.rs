//! Re-queue displaced events behind a newly placed one.
//!
//! Displaced events are laid out back to back starting at the new event's end,
//! in order of their original start time. Each keeps its own duration. The pass
//! is single-level: the shifted chain is not re-checked against events outside
//! the displaced set (see [`crate::conflict`] for auditing the result).

use chrono::{DateTime, Utc};

use crate::error::{PlannerError, Result};
use crate::model::ScheduleEvent;
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// Compute new start/end times for every event in `overlapping`.
///
/// Returns only the moved events, each with `updated_at` set to `now`. An empty
/// input yields an empty output. Ties on start time keep their input order.
///
/// # Errors
/// Returns `PlannerError::InvalidInterval` if a displaced event does not end after
/// it starts, and `PlannerError::DayOverflow` if the chain would run past 23:59.
pub fn resolve_cascade(
    overlapping: &[&ScheduleEvent],
    new_event_end: TimeOfDay,
    now: DateTime<Utc>,
) -> Result<Vec<ScheduleEvent>> {
    if overlapping.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted: Vec<&ScheduleEvent> = overlapping.to_vec();
    sorted.sort_by_key(|event| event.start_time);

    let mut cursor = new_event_end.minutes();
    let mut shifted = Vec::with_capacity(sorted.len());

    for event in sorted {
        event.validate()?;
        let duration = event.end_time.minutes() - event.start_time.minutes();

        let new_start = cursor;
        let new_end = new_start + duration;
        if new_end >= MINUTES_PER_DAY {
            return Err(PlannerError::DayOverflow {
                event_id: event.id.clone(),
                end_minutes: new_end,
            });
        }

        shifted.push(ScheduleEvent {
            start_time: TimeOfDay::from_minutes(new_start)?,
            end_time: TimeOfDay::from_minutes(new_end)?,
            updated_at: now,
            ..event.clone()
        });

        cursor = new_end;
    }

    tracing::debug!(
        moved = shifted.len(),
        chain_start = %new_event_end,
        chain_end_minutes = cursor,
        "Cascaded displaced events"
    );

    Ok(shifted)
}
