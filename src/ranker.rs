//! Display ordering for the incident collection.

use crate::incident::IncidentRecord;

/// Rank records for display: descending by points, stable on ties so
/// equal-points records keep their insertion order. Recomputed on every
/// read; the order is never stored.
pub fn rank(records: &[IncidentRecord]) -> Vec<IncidentRecord> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| b.points.cmp(&a.points));
    out
}
