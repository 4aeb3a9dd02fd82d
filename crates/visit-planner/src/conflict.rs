//! Audit a schedule for overlapping events on the same employee lane.
//!
//! Performs pairwise comparison between events that share an employee and a date.
//! Adjacent events (where one ends exactly when another starts) are NOT conflicts.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{EmployeeId, ScheduleEvent};

/// A detected conflict between two events of the same employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub employee_id: EmployeeId,
    pub event_a: ScheduleEvent,
    pub event_b: ScheduleEvent,
    pub overlap_minutes: u32,
}

/// Find all pairwise conflicts in `events`.
///
/// Two events conflict when they share `employee_id` and `date` and
/// `a.start < b.end && b.start < a.end`. The overlap length is
/// `min(a.end, b.end) - max(a.start, b.start)`. Each pair is reported once, with
/// `event_a` being the earlier of the two in input order.
pub fn find_conflicts(events: &[ScheduleEvent]) -> Vec<Conflict> {
    let all: Vec<&ScheduleEvent> = events.iter().collect();
    pairwise(&all)
}

/// Conflicts on one employee's lane for a single day.
pub fn find_lane_conflicts(
    events: &[ScheduleEvent],
    employee_id: EmployeeId,
    day: NaiveDate,
) -> Vec<Conflict> {
    let lane: Vec<&ScheduleEvent> = events
        .iter()
        .filter(|e| e.employee_id == employee_id && e.date == day)
        .collect();
    pairwise(&lane)
}

fn pairwise(events: &[&ScheduleEvent]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if a.employee_id != b.employee_id || a.date != b.date {
                continue;
            }
            if a.start_time < b.end_time && b.start_time < a.end_time {
                let overlap_start = a.start_time.max(b.start_time);
                let overlap_end = a.end_time.min(b.end_time);

                conflicts.push(Conflict {
                    employee_id: a.employee_id,
                    event_a: (*a).clone(),
                    event_b: (*b).clone(),
                    overlap_minutes: overlap_end.minutes() - overlap_start.minutes(),
                });
            }
        }
    }

    conflicts
}
