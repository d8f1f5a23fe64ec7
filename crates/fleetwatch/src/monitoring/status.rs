use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Heartbeat age up to which a center counts as online, inclusive.
pub const ONLINE_MAX_AGE_MINUTES: f64 = 2.0;
/// Heartbeat age up to which a center counts as degraded, inclusive.
pub const DEGRADED_MAX_AGE_MINUTES: f64 = 10.0;

/// Liveness classification derived from heartbeat staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterStatus {
    Online,
    Degraded,
    Offline,
}

impl CenterStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CenterStatus::Online => "online",
            CenterStatus::Degraded => "degraded",
            CenterStatus::Offline => "offline",
        }
    }
}

/// Classify a center's liveness from its last heartbeat.
///
/// A missing heartbeat means the staleness is unbounded, so the center is
/// offline. Band lower bounds are inclusive: exactly 2.0 minutes is still
/// online and exactly 10.0 minutes is still degraded.
pub fn derive_status(last_heartbeat_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> CenterStatus {
    let Some(seen_at) = last_heartbeat_at else {
        return CenterStatus::Offline;
    };

    let age_minutes = (now - seen_at).num_milliseconds() as f64 / 60_000.0;
    if age_minutes <= ONLINE_MAX_AGE_MINUTES {
        CenterStatus::Online
    } else if age_minutes <= DEGRADED_MAX_AGE_MINUTES {
        CenterStatus::Degraded
    } else {
        CenterStatus::Offline
    }
}
