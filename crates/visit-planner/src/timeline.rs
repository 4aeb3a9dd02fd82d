//! The day timeline: drop-zone slots and per-employee lanes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::model::{Employee, ScheduleEvent};
use crate::time::TimeOfDay;

/// Shape of the day grid: which hours are shown and how finely they are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineConfig {
    /// First hour with drop zones (inclusive).
    pub first_hour: u32,
    /// Last hour with drop zones (inclusive; its slots are generated too).
    pub last_hour: u32,
    /// Length of one drop zone in minutes. Must divide 60.
    pub slot_minutes: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            first_hour: 6,
            last_hour: 22,
            slot_minutes: 30,
        }
    }
}

impl TimelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.first_hour > self.last_hour || self.last_hour > 23 {
            return Err(PlannerError::Config(format!(
                "timeline hours must satisfy first <= last <= 23, got {}..={}",
                self.first_hour, self.last_hour
            )));
        }
        if self.slot_minutes == 0 || 60 % self.slot_minutes != 0 {
            return Err(PlannerError::Config(format!(
                "slotMinutes must divide 60, got {}",
                self.slot_minutes
            )));
        }
        Ok(())
    }
}

/// One drop zone on an employee lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub time: TimeOfDay,
    /// True for slots starting on a full hour (the grid draws a label there).
    pub is_hour_mark: bool,
}

/// Generate the day's drop zones. With the default config: 06:00, 06:30, ... 22:30.
pub fn time_slots(config: &TimelineConfig) -> Result<Vec<TimeSlot>> {
    config.validate()?;

    let mut slots = Vec::new();
    for hour in config.first_hour..=config.last_hour {
        for minute in (0..60).step_by(config.slot_minutes as usize) {
            slots.push(TimeSlot {
                time: TimeOfDay::from_hm(hour, minute)?,
                is_hour_mark: minute == 0,
            });
        }
    }
    Ok(slots)
}

/// One employee's row on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeLane<'a> {
    pub employee: &'a Employee,
    /// The employee's events on the lane's day, sorted by start time.
    pub events: Vec<&'a ScheduleEvent>,
}

impl EmployeeLane<'_> {
    /// Total booked minutes on this lane.
    pub fn booked_minutes(&self) -> i64 {
        self.events.iter().map(|e| e.duration_minutes()).sum()
    }
}

/// Partition `events` on `day` into one lane per employee, in `employees` order.
///
/// Employees without events still get an (empty) lane. Events of employees not
/// in `employees` are left out.
pub fn employee_lanes<'a>(
    employees: &'a [Employee],
    events: &'a [ScheduleEvent],
    day: NaiveDate,
) -> Vec<EmployeeLane<'a>> {
    employees
        .iter()
        .map(|employee| {
            let mut lane_events: Vec<&ScheduleEvent> = events
                .iter()
                .filter(|e| e.employee_id == employee.id && e.date == day)
                .collect();
            lane_events.sort_by_key(|e| (e.start_time, e.end_time));
            EmployeeLane {
                employee,
                events: lane_events,
            }
        })
        .collect()
}
