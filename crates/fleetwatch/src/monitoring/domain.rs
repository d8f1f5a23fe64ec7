use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Identifier wrapper for inspection centers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CenterId(pub String);

/// Strict administrative containment chain locating a center:
/// region, then zone or sub-city, then woreda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionPath {
    pub region: String,
    pub zone: String,
    pub woreda: String,
}

/// Reported state of a single inspection-lane machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineStatus {
    Operational,
    Syncing,
    Offline,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDevice {
    pub id: String,
    pub status: MachineStatus,
}

/// Open-incident counts by severity, refreshed by external telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub total: u32,
}

/// A registered inspection center. The scoring core only ever reads these
/// records; heartbeat and incident counts are refreshed upstream on each
/// polling cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub id: CenterId,
    pub name: String,
    pub jurisdiction: JurisdictionPath,
    pub coordinate: Coordinate,
    pub last_heartbeat_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub open_incidents: IncidentCounts,
    #[serde(default)]
    pub machines: Vec<MachineDevice>,
}

/// Incident categories produced by the external detection process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    CenterOffline,
    GeofenceBreach,
    MachineFault,
    CameraOffline,
    EvidenceGap,
    SuspiciousActivity,
    OutlierSignal,
    StorageCritical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Open,
    Acknowledged,
    InProgress,
    Resolved,
    FalsePositive,
}

/// Where an incident was observed. Machine and camera references narrow
/// the scope below center level when the detector knows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentScope {
    pub center_id: CenterId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,
}

/// An incident detected upstream; consumed read-only by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IncidentType,
    pub severity: IncidentSeverity,
    pub scope: IncidentScope,
    pub status: IncidentStatus,
    pub first_detected_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incident_types_use_snake_case_wire_names() {
        let json = serde_json::to_string(&IncidentType::GeofenceBreach).expect("serializes");
        assert_eq!(json, "\"geofence_breach\"");
        let parsed: IncidentType =
            serde_json::from_str("\"camera_offline\"").expect("deserializes");
        assert_eq!(parsed, IncidentType::CameraOffline);
    }

    #[test]
    fn incident_kind_serializes_under_type_key() {
        let incident = Incident {
            id: "inc-001".to_string(),
            kind: IncidentType::EvidenceGap,
            severity: IncidentSeverity::Medium,
            scope: IncidentScope {
                center_id: CenterId("ctr-001".to_string()),
                machine_id: None,
                camera_id: None,
            },
            status: IncidentStatus::Open,
            first_detected_at: Utc::now(),
        };
        let value = serde_json::to_value(&incident).expect("serializes");
        assert_eq!(value["type"], "evidence_gap");
    }
}
