//! Schedule data model: events on employee timelines, the unassigned pool, and
//! the read-only reference data (employees, customers, measures).
//!
//! JSON field names follow the presentation layer (`employeeId`, `startTime`, ...).

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::time::{TimeBand, TimeOfDay};

pub type EmployeeId = u32;
pub type CustomerId = u32;
pub type MeasureId = u32;

/// Lifecycle status of a scheduled visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Urgency of an unassigned visit. Declared most urgent first, so the derived
/// `Ord` sorts urgent visits to the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

/// A visit placed on one employee's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: String,
    pub employee_id: EmployeeId,
    pub customer_id: CustomerId,
    pub measure_id: MeasureId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleEvent {
    /// Length of the visit in minutes. Negative only for malformed events;
    /// see [`ScheduleEvent::validate`].
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end_time.minutes()) - i64::from(self.start_time.minutes())
    }

    /// Half-open overlap test against `[start, end)`. Touching endpoints do not overlap.
    pub fn overlaps(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        start < self.end_time && end > self.start_time
    }

    /// Check that the event ends strictly after it starts.
    pub fn validate(&self) -> Result<()> {
        if self.end_time <= self.start_time {
            return Err(PlannerError::InvalidInterval {
                event_id: self.id.clone(),
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }
        Ok(())
    }
}

/// A care need waiting to be placed on a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedVisit {
    pub id: String,
    pub customer_id: CustomerId,
    pub measure_id: MeasureId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time_slot: Option<TimeBand>,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    Monthly,
    Hourly,
}

/// A caregiver. Each employee owns one timeline lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    pub employment_type: EmploymentType,
    /// Percentage of full time.
    pub employment_degree: u32,
    pub weekly_hours: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub personal_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

/// A catalogued care task. Its default duration seeds new placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub id: MeasureId,
    pub name: String,
    /// Minutes.
    pub default_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The mutable half of the schedule: what a drop reads and rewrites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    #[serde(default)]
    pub schedule_events: Vec<ScheduleEvent>,
    #[serde(default)]
    pub unassigned_visits: Vec<UnassignedVisit>,
}

impl ScheduleState {
    pub fn event(&self, id: &str) -> Option<&ScheduleEvent> {
        self.schedule_events.iter().find(|e| e.id == id)
    }

    pub fn visit(&self, id: &str) -> Option<&UnassignedVisit> {
        self.unassigned_visits.iter().find(|v| v.id == id)
    }
}

/// A full view of one planning session: reference data plus schedule state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub measures: Vec<Measure>,
    #[serde(flatten)]
    pub state: ScheduleState,
}

impl Snapshot {
    /// Parse a snapshot from JSON and validate every event interval.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        for event in &snapshot.state.schedule_events {
            event.validate()?;
        }
        Ok(snapshot)
    }
}

fn default_true() -> bool {
    true
}
