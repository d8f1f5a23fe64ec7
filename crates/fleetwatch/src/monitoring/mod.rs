//! The scoring core: scope resolution, status derivation, attention
//! scoring, geofence compliance, and the boundary editor.

pub mod attention;
pub mod boundary;
pub mod domain;
pub mod geofence;
pub mod router;
pub mod scope;
pub mod status;

use chrono::{DateTime, Utc};

use attention::{compute_attention_score, AttentionOutcome};
use domain::{Center, Incident};
use status::derive_status;

/// Evaluate one polling cycle over a batch of centers.
///
/// Both inputs are expected to be scope-filtered already. Each center is
/// scored against only its own incidents, so the batch could just as well
/// be fanned out across threads; the sequential loop here is plenty for
/// current fleet sizes.
pub fn evaluate_fleet(
    centers: &[Center],
    incidents: &[Incident],
    now: DateTime<Utc>,
) -> Vec<AttentionOutcome> {
    tracing::debug!(
        centers = centers.len(),
        incidents = incidents.len(),
        "evaluating fleet batch"
    );
    centers
        .iter()
        .map(|center| {
            let scoped: Vec<Incident> = incidents
                .iter()
                .filter(|incident| incident.scope.center_id == center.id)
                .cloned()
                .collect();
            let status = derive_status(center.last_heartbeat_at, now);
            compute_attention_score(center, status, now, &scoped)
        })
        .collect()
}
