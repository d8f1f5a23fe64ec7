use chrono::{Duration, Utc};
use clap::Args;

use fleetwatch::config::AppConfig;
use fleetwatch::error::AppError;
use fleetwatch::geo::Coordinate;
use fleetwatch::monitoring::attention::rank_by_attention;
use fleetwatch::monitoring::boundary::{BoundaryEditor, PointOutcome};
use fleetwatch::monitoring::domain::{
    Center, CenterId, Incident, IncidentScope, IncidentSeverity, IncidentStatus, IncidentType,
    JurisdictionPath, MachineDevice, MachineStatus,
};
use fleetwatch::monitoring::evaluate_fleet;
use fleetwatch::monitoring::geofence::{
    classify, classify_sample, requires_breach_incident, LocationConfidence,
};
use fleetwatch::monitoring::scope::{filter_by_scope, resolve_scope, Actor, ActorRole, ScopeKey};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Role descriptor used to resolve the demo viewer's scope
    #[arg(long, default_value = "super admin")]
    pub(crate) role: String,
    /// Region assignment for regional-admin roles
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// How many ranked centers to show (defaults to the configured cut)
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Latitude of the recorded inspection location
    #[arg(long)]
    pub(crate) sample_lat: f64,
    /// Longitude of the recorded inspection location
    #[arg(long)]
    pub(crate) sample_lon: f64,
    /// Latitude of the center's authorized coordinate
    #[arg(long)]
    pub(crate) center_lat: f64,
    /// Longitude of the center's authorized coordinate
    #[arg(long)]
    pub(crate) center_lon: f64,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let sample = Coordinate::new(args.sample_lat, args.sample_lon);
    let center = Coordinate::new(args.center_lat, args.center_lon);

    let classification = classify(sample, center)?;
    println!(
        "{} at {:.1} m from the authorized coordinate",
        classification.band.label(),
        classification.distance_m
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let top_n = args.top_n.unwrap_or(config.overview.default_top_n);
    let now = Utc::now();

    let actor = Actor {
        role: ActorRole::from_descriptor(&args.role),
        region: args.region,
        center: None,
        scope: None,
    };
    let scope = resolve_scope(&actor);
    println!("Fleet monitoring demo");
    println!("- Resolved scope: {scope:?}");

    let centers = filter_by_scope(demo_fleet(now), &scope, center_scope_key);
    let incidents = demo_incidents(now);
    println!("- {} center(s) visible after scoping", centers.len());

    let outcomes = evaluate_fleet(&centers, &incidents, now);
    let ranked = rank_by_attention(outcomes, top_n);

    println!("\nCenters requiring attention (top {top_n}):");
    for outcome in &ranked {
        println!(
            "- {} [{}] score {} ({})",
            outcome.center_name,
            outcome.status.label(),
            outcome.score,
            outcome.severity.label()
        );
        for reason in &outcome.reasons {
            println!("    {reason}");
        }
    }

    println!("\nGeofence compliance snapshot:");
    let center_coord = Coordinate::new(9.0054, 38.7636);
    let sample = classify_sample(
        "insp-48121".to_string(),
        CenterId("ctr-001".to_string()),
        Coordinate::new(9.0070, 38.7636),
        center_coord,
        "gps".to_string(),
        LocationConfidence::High,
    )?;
    println!(
        "- Inspection {} banded {} at {:.1} m (confidence {:?})",
        sample.inspection_id,
        sample.band.label(),
        sample.distance_m,
        sample.confidence
    );
    if requires_breach_incident(&sample, |_| false) {
        println!("  -> would raise a geofence_breach incident");
    }

    println!("\nBoundary drawing walkthrough:");
    let mut editor = BoundaryEditor::new();
    editor.start_drawing();
    editor.add_point(Coordinate::new(9.0000, 38.7600))?;
    editor.add_point(Coordinate::new(9.0000, 38.7700))?;
    editor.add_point(Coordinate::new(9.0100, 38.7700))?;
    match editor.add_point(Coordinate::new(9.00002, 38.76001))? {
        PointOutcome::Closed(polygon) => {
            println!(
                "- Closure click snapped to the first vertex; ring has {} points",
                polygon.len()
            );
        }
        PointOutcome::Added { vertex_count } => {
            println!("- Still drawing with {vertex_count} vertices");
        }
    }

    Ok(())
}

fn center_scope_key(center: &Center) -> ScopeKey<'_> {
    ScopeKey {
        region: &center.jurisdiction.region,
        id: &center.id.0,
        name: &center.name,
    }
}

fn demo_fleet(now: chrono::DateTime<Utc>) -> Vec<Center> {
    let center = |id: &str, name: &str, region: &str, zone: &str, woreda: &str,
                  coordinate: Coordinate,
                  heartbeat_age: Option<Duration>,
                  machines: Vec<MachineDevice>| Center {
        id: CenterId(id.to_string()),
        name: name.to_string(),
        jurisdiction: JurisdictionPath {
            region: region.to_string(),
            zone: zone.to_string(),
            woreda: woreda.to_string(),
        },
        coordinate,
        last_heartbeat_at: heartbeat_age.map(|age| now - age),
        open_incidents: Default::default(),
        machines,
    };

    vec![
        center(
            "ctr-001",
            "Adama Center",
            "Oromia",
            "East Shewa",
            "Adama",
            Coordinate::new(8.5400, 39.2700),
            Some(Duration::seconds(45)),
            vec![MachineDevice {
                id: "lane-1".to_string(),
                status: MachineStatus::Operational,
            }],
        ),
        center(
            "ctr-002",
            "Bahir Dar Center",
            "Amhara",
            "West Gojjam",
            "Bahir Dar",
            Coordinate::new(11.5936, 37.3908),
            Some(Duration::minutes(6)),
            vec![MachineDevice {
                id: "lane-1".to_string(),
                status: MachineStatus::Syncing,
            }],
        ),
        center(
            "ctr-003",
            "Jimma Center",
            "Oromia",
            "Jimma",
            "Jimma Town",
            Coordinate::new(7.6667, 36.8333),
            Some(Duration::minutes(95)),
            vec![
                MachineDevice {
                    id: "lane-1".to_string(),
                    status: MachineStatus::Offline,
                },
                MachineDevice {
                    id: "lane-2".to_string(),
                    status: MachineStatus::Offline,
                },
            ],
        ),
    ]
}

fn demo_incidents(now: chrono::DateTime<Utc>) -> Vec<Incident> {
    let incident = |id: &str, center_id: &str, kind: IncidentType, severity: IncidentSeverity| {
        Incident {
            id: id.to_string(),
            kind,
            severity,
            scope: IncidentScope {
                center_id: CenterId(center_id.to_string()),
                machine_id: None,
                camera_id: None,
            },
            status: IncidentStatus::Open,
            first_detected_at: now - Duration::hours(1),
        }
    };

    vec![
        incident(
            "inc-101",
            "ctr-003",
            IncidentType::GeofenceBreach,
            IncidentSeverity::High,
        ),
        incident(
            "inc-102",
            "ctr-003",
            IncidentType::GeofenceBreach,
            IncidentSeverity::High,
        ),
        incident(
            "inc-103",
            "ctr-003",
            IncidentType::EvidenceGap,
            IncidentSeverity::Medium,
        ),
        incident(
            "inc-104",
            "ctr-002",
            IncidentType::CameraOffline,
            IncidentSeverity::Medium,
        ),
    ]
}
