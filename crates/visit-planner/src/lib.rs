//! # visit-planner
//!
//! Drag-and-drop placement for a home-care visit schedule.
//!
//! The planner owns the one piece of real logic behind the day timeline: putting a
//! visit on an employee's lane, finding the visits it collides with, and pushing
//! those later so the lane stays free of overlaps. Everything is pure computation
//! over in-memory snapshots; fetching and persisting schedules is up to the caller.
//!
//! ## Modules
//!
//! - [`time`] — "HH:MM" ⇄ minute-of-day, durations, time bands
//! - [`model`] — Events, unassigned visits, employees, customers, measures
//! - [`overlap`] — Per-employee half-open overlap detection
//! - [`cascade`] — Re-queue displaced events behind a placed one
//! - [`placement`] — Apply one drop gesture to a schedule state
//! - [`conflict`] — Audit a schedule for overlapping events
//! - [`pool`] — Priority ordering of the unassigned pool
//! - [`timeline`] — Day drop-zone slots and employee lanes
//! - [`config`] — Planner configuration
//! - [`error`] — Error types

pub mod cascade;
pub mod config;
pub mod conflict;
pub mod error;
pub mod model;
pub mod overlap;
pub mod placement;
pub mod pool;
pub mod time;
pub mod timeline;

pub use cascade::resolve_cascade;
pub use config::PlannerConfig;
pub use conflict::{find_conflicts, Conflict};
pub use error::PlannerError;
pub use model::{
    Customer, Employee, EventStatus, Measure, Priority, ScheduleEvent, ScheduleState, Snapshot,
    UnassignedVisit,
};
pub use overlap::find_overlapping;
pub use placement::{place_drop, DragItem, DropContext, DropOutcome, DropTarget, Placement};
pub use time::{TimeBand, TimeOfDay};
