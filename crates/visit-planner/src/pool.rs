//! Ordering of the unassigned-visit pool: urgent first, then high, medium, low.

use crate::model::{Priority, UnassignedVisit};

/// Visits in pool order, optionally keeping only one priority.
///
/// The sort is stable, so visits of equal priority keep their registration order.
pub fn pool_order(visits: &[UnassignedVisit], only: Option<Priority>) -> Vec<&UnassignedVisit> {
    let mut ordered: Vec<&UnassignedVisit> = visits
        .iter()
        .filter(|v| only.is_none_or(|p| v.priority == p))
        .collect();
    ordered.sort_by_key(|v| v.priority);
    ordered
}
