//! Find the events on one employee's lane that collide with a candidate interval.
//!
//! Overlap is scoped per employee: an employee performs one visit at a time, and
//! other employees' events never block a placement. Intervals are half-open, so an
//! event ending exactly when the candidate starts is NOT a collision.

use crate::model::{EmployeeId, ScheduleEvent};
use crate::time::TimeOfDay;

/// Return the events of `employee_id` whose interval intersects `[start, end)`.
///
/// Two intervals overlap iff `start < event.end && end > event.start`.
/// `exclude_event_id` skips the event being relocated so it never collides with
/// its own new position. Results keep the input order; no sorting happens here.
pub fn find_overlapping<'a, I>(
    events: I,
    start: TimeOfDay,
    end: TimeOfDay,
    employee_id: EmployeeId,
    exclude_event_id: Option<&str>,
) -> Vec<&'a ScheduleEvent>
where
    I: IntoIterator<Item = &'a ScheduleEvent>,
{
    events
        .into_iter()
        .filter(|event| exclude_event_id != Some(event.id.as_str()))
        .filter(|event| event.employee_id == employee_id)
        .filter(|event| event.overlaps(start, end))
        .collect()
}
