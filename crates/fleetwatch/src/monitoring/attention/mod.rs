mod rules;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Center, CenterId, Incident};
use super::status::CenterStatus;

/// Signals feeding the attention score, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Offline,
    Degraded,
    MachineDowntime,
    GeofenceBreaches,
    EvidenceGaps,
    CameraIssues,
    FraudFlags,
}

/// Discrete, independently capped contribution to the attention score,
/// kept so operators can audit how a score was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalContribution {
    pub signal: SignalKind,
    pub points: u8,
    pub note: String,
}

/// Coarse urgency bucket derived from the attention score, used by
/// ranking and coloring downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBucket {
    Critical,
    High,
    Medium,
    Low,
}

impl SeverityBucket {
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            SeverityBucket::Critical
        } else if score >= 50 {
            SeverityBucket::High
        } else if score >= 30 {
            SeverityBucket::Medium
        } else {
            SeverityBucket::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SeverityBucket::Critical => "critical",
            SeverityBucket::High => "high",
            SeverityBucket::Medium => "medium",
            SeverityBucket::Low => "low",
        }
    }
}

/// Per-center evaluation output consumed by ranking and rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionOutcome {
    pub center_id: CenterId,
    pub center_name: String,
    pub status: CenterStatus,
    pub score: u8,
    pub severity: SeverityBucket,
    pub reasons: Vec<String>,
    pub signals: Vec<SignalContribution>,
}

/// Score how urgently a center needs operator attention.
///
/// `incidents` must already be narrowed to this center's scope. The
/// function is pure: evaluating many centers concurrently is safe because
/// nothing here is shared or mutated.
pub fn compute_attention_score(
    center: &Center,
    status: CenterStatus,
    now: DateTime<Utc>,
    incidents: &[Incident],
) -> AttentionOutcome {
    let (signals, score, reasons) = rules::evaluate_signals(center, status, now, incidents);

    AttentionOutcome {
        center_id: center.id.clone(),
        center_name: center.name.clone(),
        status,
        score,
        severity: SeverityBucket::from_score(score),
        reasons,
        signals,
    }
}

/// Order outcomes for the "centers requiring attention" view: descending
/// by score, stable so ties keep their input order, truncated to `top_n`.
pub fn rank_by_attention(
    mut outcomes: Vec<AttentionOutcome>,
    top_n: usize,
) -> Vec<AttentionOutcome> {
    outcomes.sort_by(|a, b| b.score.cmp(&a.score));
    outcomes.truncate(top_n);
    outcomes
}
