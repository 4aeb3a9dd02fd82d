//! Apply one drag-and-drop gesture to a schedule snapshot.
//!
//! [`place_drop`] is a pure function of (dragged item, drop target, prior state):
//! it never mutates its input and returns a fresh [`ScheduleState`] together with
//! a [`DropOutcome`] describing what happened. Drops onto nothing, onto a slot
//! without a usable employee or time, or of a pool visit back onto the pool are
//! recognized no-ops, not errors.
//!
//! A drop onto an employee slot:
//!
//! 1. resolves the duration (measure default for pool visits, own length for
//!    relocated events),
//! 2. finds the target employee's events on the planning day that overlap the
//!    candidate interval (excluding the dragged event itself),
//! 3. cascades those events to start right after the placed one,
//! 4. writes the placed event and the shifted events into a new state.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cascade::resolve_cascade;
use crate::config::PlannerConfig;
use crate::conflict::find_lane_conflicts;
use crate::error::{PlannerError, Result};
use crate::model::{
    EmployeeId, EventStatus, Measure, MeasureId, ScheduleEvent, ScheduleState, UnassignedVisit,
};
use crate::overlap::find_overlapping;
use crate::time::{TimeBand, TimeOfDay};

/// What the user picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DragItem {
    /// A card from the unassigned pool.
    #[serde(rename_all = "camelCase")]
    UnassignedVisit { visit_id: String },
    /// A card already on a timeline.
    #[serde(rename_all = "camelCase")]
    ScheduleEvent { event_id: String },
}

/// Where the user let go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropTarget {
    /// A drop zone on an employee lane. `time_slot` is the zone's "HH:MM" label.
    /// Either field may be missing from a half-built payload.
    #[serde(rename_all = "camelCase")]
    EmployeeSlot {
        #[serde(default)]
        employee_id: Option<EmployeeId>,
        #[serde(default)]
        time_slot: Option<String>,
    },
    /// The unassigned-visits panel.
    #[serde(rename = "UNASSIGNED_PANEL")]
    UnassignedPool,
    /// No drop target (the drag was cancelled, ended over empty space, or
    /// landed on something that is not a drop zone).
    #[serde(other)]
    Invalid,
}

/// Why a drop left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreReason {
    NoTarget,
    MissingEmployee,
    MissingSlotTime,
    MalformedSlotTime,
    AlreadyUnassigned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum DropOutcome {
    /// The dragged item now sits on `employee_id`'s lane.
    #[serde(rename_all = "camelCase")]
    Placed {
        event_id: String,
        employee_id: EmployeeId,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        /// Ids of the events shifted to make room, in their new order.
        displaced: Vec<String>,
        /// The placed pool visit landed outside its preferred time band.
        band_mismatch: bool,
    },
    /// A scheduled event was converted back into an unassigned visit.
    #[serde(rename_all = "camelCase")]
    ReturnedToPool { visit_id: String, from_event_id: String },
    Ignored { reason: IgnoreReason },
}

/// The result of a drop: the new state plus what happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub state: ScheduleState,
    pub outcome: DropOutcome,
}

/// Everything a drop needs besides the state itself.
#[derive(Debug, Clone)]
pub struct DropContext<'a> {
    /// Measure catalog, for the default duration of pool visits.
    pub measures: &'a [Measure],
    pub config: &'a PlannerConfig,
    /// The day shown on the timeline. Placed events land on this date, and only
    /// events on this date can collide.
    pub day: NaiveDate,
    /// Timestamp written to created/updated fields.
    pub now: DateTime<Utc>,
}

impl<'a> DropContext<'a> {
    /// Context stamped with the current time.
    pub fn new(measures: &'a [Measure], config: &'a PlannerConfig, day: NaiveDate) -> Self {
        Self {
            measures,
            config,
            day,
            now: Utc::now(),
        }
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn measure_duration(&self, measure_id: MeasureId) -> Result<u32> {
        self.measures
            .iter()
            .find(|m| m.id == measure_id)
            .map(|m| m.default_duration)
            .ok_or(PlannerError::UnknownMeasure(measure_id))
    }
}

/// Apply a single drop to `state` and return the resulting state.
///
/// # Errors
/// - `PlannerError::UnknownVisit` / `UnknownEvent` if the dragged item is not in `state`.
/// - `PlannerError::UnknownMeasure` if a pool visit references a measure missing
///   from the catalog.
/// - `PlannerError::InvalidInterval` if the resolved duration is not positive.
/// - `PlannerError::DayOverflow` if the placed event or the cascade would run
///   past 23:59.
///
/// On error the caller's state is untouched and should be kept as is.
pub fn place_drop(
    item: &DragItem,
    target: &DropTarget,
    state: &ScheduleState,
    ctx: &DropContext<'_>,
) -> Result<Placement> {
    match target {
        DropTarget::Invalid => Ok(ignored(state, IgnoreReason::NoTarget)),
        DropTarget::UnassignedPool => match item {
            DragItem::UnassignedVisit { .. } => Ok(ignored(state, IgnoreReason::AlreadyUnassigned)),
            DragItem::ScheduleEvent { event_id } => return_to_pool(event_id, state, ctx),
        },
        DropTarget::EmployeeSlot {
            employee_id,
            time_slot,
        } => {
            let Some(employee_id) = *employee_id else {
                return Ok(ignored(state, IgnoreReason::MissingEmployee));
            };
            let label = match time_slot.as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => label,
                _ => return Ok(ignored(state, IgnoreReason::MissingSlotTime)),
            };
            let Ok(start) = label.parse::<TimeOfDay>() else {
                return Ok(ignored(state, IgnoreReason::MalformedSlotTime));
            };
            place_on_slot(item, employee_id, start, state, ctx)
        }
    }
}

fn ignored(state: &ScheduleState, reason: IgnoreReason) -> Placement {
    tracing::debug!(?reason, "Drop ignored");
    Placement {
        state: state.clone(),
        outcome: DropOutcome::Ignored { reason },
    }
}

/// The dragged item, resolved against the state.
#[derive(Clone, Copy)]
enum Dragged<'a> {
    Visit(&'a UnassignedVisit),
    Event(&'a ScheduleEvent),
}

impl Dragged<'_> {
    fn id(&self) -> &str {
        match self {
            Dragged::Visit(v) => &v.id,
            Dragged::Event(e) => &e.id,
        }
    }
}

fn place_on_slot(
    item: &DragItem,
    employee_id: EmployeeId,
    start: TimeOfDay,
    state: &ScheduleState,
    ctx: &DropContext<'_>,
) -> Result<Placement> {
    let dragged = match item {
        DragItem::UnassignedVisit { visit_id } => state
            .visit(visit_id)
            .map(Dragged::Visit)
            .ok_or_else(|| PlannerError::UnknownVisit(visit_id.clone()))?,
        DragItem::ScheduleEvent { event_id } => state
            .event(event_id)
            .map(Dragged::Event)
            .ok_or_else(|| PlannerError::UnknownEvent(event_id.clone()))?,
    };

    let duration = match dragged {
        Dragged::Visit(visit) => ctx.measure_duration(visit.measure_id)?,
        Dragged::Event(event) => {
            event.validate()?;
            event.end_time.minutes() - event.start_time.minutes()
        }
    };

    if duration == 0 {
        return Err(PlannerError::InvalidInterval {
            event_id: dragged.id().to_string(),
            start: start.to_string(),
            end: start.to_string(),
        });
    }
    let end = start
        .checked_add_minutes(duration)
        .ok_or_else(|| PlannerError::DayOverflow {
            event_id: dragged.id().to_string(),
            end_minutes: start.minutes().saturating_add(duration),
        })?;

    let exclude = match dragged {
        Dragged::Event(event) => Some(event.id.as_str()),
        Dragged::Visit(_) => None,
    };
    let overlapping = find_overlapping(
        state.schedule_events.iter().filter(|e| e.date == ctx.day),
        start,
        end,
        employee_id,
        exclude,
    );
    let shifted = resolve_cascade(&overlapping, end, ctx.now)?;
    let displaced: Vec<String> = shifted.iter().map(|e| e.id.clone()).collect();

    let mut replacements: HashMap<String, ScheduleEvent> =
        shifted.into_iter().map(|e| (e.id.clone(), e)).collect();

    let mut events: Vec<ScheduleEvent> = state
        .schedule_events
        .iter()
        .map(|event| match replacements.remove(&event.id) {
            Some(moved) => moved,
            None if Some(event.id.as_str()) == exclude => ScheduleEvent {
                employee_id,
                date: ctx.day,
                start_time: start,
                end_time: end,
                updated_at: ctx.now,
                ..event.clone()
            },
            None => event.clone(),
        })
        .collect();

    let mut unassigned_visits = state.unassigned_visits.clone();
    let mut band_mismatch = false;

    let event_id = match dragged {
        Dragged::Event(event) => event.id.clone(),
        Dragged::Visit(visit) => {
            band_mismatch = visit
                .preferred_time_slot
                .is_some_and(|band| !band.contains(start));
            if band_mismatch {
                tracing::warn!(
                    visit_id = %visit.id,
                    preferred = ?visit.preferred_time_slot,
                    start = %start,
                    "Visit placed outside its preferred time band"
                );
            }

            let event = ScheduleEvent {
                id: format!("event-{}", Uuid::now_v7()),
                employee_id,
                customer_id: visit.customer_id,
                measure_id: visit.measure_id,
                date: ctx.day,
                start_time: start,
                end_time: end,
                status: EventStatus::Scheduled,
                notes: visit.notes.clone(),
                created_at: ctx.now,
                updated_at: ctx.now,
            };
            let id = event.id.clone();
            events.push(event);
            unassigned_visits.retain(|v| v.id != visit.id);
            id
        }
    };

    let residual = find_lane_conflicts(&events, employee_id, ctx.day);
    if !residual.is_empty() {
        tracing::warn!(
            employee_id,
            conflicts = residual.len(),
            "Cascade left overlapping events on the lane"
        );
    }

    tracing::debug!(
        %event_id,
        employee_id,
        start = %start,
        end = %end,
        displaced = displaced.len(),
        "Placed event"
    );

    Ok(Placement {
        state: ScheduleState {
            schedule_events: events,
            unassigned_visits,
        },
        outcome: DropOutcome::Placed {
            event_id,
            employee_id,
            start_time: start,
            end_time: end,
            displaced,
            band_mismatch,
        },
    })
}

fn return_to_pool(event_id: &str, state: &ScheduleState, ctx: &DropContext<'_>) -> Result<Placement> {
    let event = state
        .event(event_id)
        .ok_or_else(|| PlannerError::UnknownEvent(event_id.to_string()))?;

    let visit = UnassignedVisit {
        id: format!("visit-{}", Uuid::now_v7()),
        customer_id: event.customer_id,
        measure_id: event.measure_id,
        preferred_date: Some(event.date),
        preferred_time_slot: TimeBand::of(event.start_time),
        priority: ctx.config.return_priority,
        notes: Some(ctx.config.return_note.clone()),
    };
    let visit_id = visit.id.clone();

    let schedule_events = state
        .schedule_events
        .iter()
        .filter(|e| e.id != event_id)
        .cloned()
        .collect();
    let mut unassigned_visits = state.unassigned_visits.clone();
    unassigned_visits.push(visit);

    tracing::debug!(%event_id, %visit_id, "Returned event to unassigned pool");

    Ok(Placement {
        state: ScheduleState {
            schedule_events,
            unassigned_visits,
        },
        outcome: DropOutcome::ReturnedToPool {
            visit_id,
            from_event_id: event_id.to_string(),
        },
    })
}
