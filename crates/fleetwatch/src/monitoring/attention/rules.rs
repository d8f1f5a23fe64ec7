use chrono::{DateTime, Duration, Utc};

use super::super::domain::{Center, Incident, IncidentType, MachineStatus};
use super::super::status::CenterStatus;
use super::{SignalContribution, SignalKind};

/// Walk the signal table in its fixed evaluation order.
///
/// Each signal's contribution is capped independently before the total is
/// capped at 100. The reason list keeps the first three triggered reason
/// texts in table order; machine downtime moves the score but stays out of
/// the operator-facing reasons by policy.
pub(crate) fn evaluate_signals(
    center: &Center,
    status: CenterStatus,
    now: DateTime<Utc>,
    incidents: &[Incident],
) -> (Vec<SignalContribution>, u8, Vec<String>) {
    let mut contributions = Vec::new();
    let mut total: u32 = 0;
    let mut reasons = Vec::new();

    match status {
        CenterStatus::Offline => {
            let reason = match center.last_heartbeat_at {
                Some(seen_at) => format!("Center offline {}", format_outage(now - seen_at)),
                // Never-seen centers have no measurable outage length.
                None => "Center offline".to_string(),
            };
            contributions.push(SignalContribution {
                signal: SignalKind::Offline,
                points: 40,
                note: reason.clone(),
            });
            total += 40;
            reasons.push(reason);
        }
        CenterStatus::Degraded => {
            let reason = "Center degraded".to_string();
            contributions.push(SignalContribution {
                signal: SignalKind::Degraded,
                points: 20,
                note: reason.clone(),
            });
            total += 20;
            reasons.push(reason);
        }
        CenterStatus::Online => {}
    }

    let down_machines = center
        .machines
        .iter()
        .filter(|machine| {
            matches!(machine.status, MachineStatus::Offline | MachineStatus::Syncing)
        })
        .count() as u32;
    if down_machines > 0 {
        let points = (down_machines * 5).min(20);
        contributions.push(SignalContribution {
            signal: SignalKind::MachineDowntime,
            points: points as u8,
            note: format!("{down_machines} machine(s) offline or syncing"),
        });
        total += points;
    }

    let breach_count = count_of(incidents, IncidentType::GeofenceBreach);
    if breach_count > 0 {
        let points = (breach_count * 3).min(15);
        let reason = format!("{breach_count} geofence breach(es) today");
        contributions.push(SignalContribution {
            signal: SignalKind::GeofenceBreaches,
            points: points as u8,
            note: reason.clone(),
        });
        total += points;
        reasons.push(reason);
    }

    let gap_count = count_of(incidents, IncidentType::EvidenceGap);
    if gap_count > 0 {
        let points = (gap_count * 2).min(10);
        let reason = format!("{gap_count} evidence gap(s) detected");
        contributions.push(SignalContribution {
            signal: SignalKind::EvidenceGaps,
            points: points as u8,
            note: reason.clone(),
        });
        total += points;
        reasons.push(reason);
    }

    let camera_count = count_of(incidents, IncidentType::CameraOffline);
    if camera_count > 0 {
        let points = (camera_count * 5).min(10);
        let reason = "Camera offline".to_string();
        contributions.push(SignalContribution {
            signal: SignalKind::CameraIssues,
            points: points as u8,
            note: reason.clone(),
        });
        total += points;
        reasons.push(reason);
    }

    // Breaches and evidence gaps already scored above; fraud flags count
    // the detector's own outputs so nothing is double counted.
    let fraud_count = count_of(incidents, IncidentType::SuspiciousActivity)
        + count_of(incidents, IncidentType::OutlierSignal);
    if fraud_count > 0 {
        let points = fraud_count.min(5);
        let reason = format!("{fraud_count} fraud flag(s)");
        contributions.push(SignalContribution {
            signal: SignalKind::FraudFlags,
            points: points as u8,
            note: reason.clone(),
        });
        total += points;
        reasons.push(reason);
    }

    reasons.truncate(3);
    (contributions, total.min(100) as u8, reasons)
}

fn count_of(incidents: &[Incident], kind: IncidentType) -> u32 {
    incidents.iter().filter(|incident| incident.kind == kind).count() as u32
}

/// Outage length as operators read it: minutes under an hour, whole hours
/// after that, no remainder.
fn format_outage(age: Duration) -> String {
    let minutes = age.num_minutes().max(0);
    if minutes < 60 {
        format!("{minutes}m")
    } else {
        format!("{}h", minutes / 60)
    }
}
