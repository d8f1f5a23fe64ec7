//! Integration specifications for the fleet monitoring pipeline.
//!
//! Scenarios drive the public surface end to end: scope resolution over a
//! center batch, status derivation and attention scoring per center, and
//! the HTTP router, without reaching into private modules.

mod common {
    use chrono::{DateTime, Duration, Utc};

    use fleetwatch::geo::Coordinate;
    use fleetwatch::monitoring::domain::{
        Center, CenterId, Incident, IncidentScope, IncidentSeverity, IncidentStatus, IncidentType,
        JurisdictionPath, MachineDevice, MachineStatus,
    };

    pub(super) fn poll_instant() -> DateTime<Utc> {
        "2026-08-24T09:00:00Z".parse().expect("valid timestamp")
    }

    pub(super) fn center(
        id: &str,
        name: &str,
        region: &str,
        heartbeat_age: Option<Duration>,
    ) -> Center {
        Center {
            id: CenterId(id.to_string()),
            name: name.to_string(),
            jurisdiction: JurisdictionPath {
                region: region.to_string(),
                zone: "Zone 1".to_string(),
                woreda: "W-01".to_string(),
            },
            coordinate: Coordinate::new(9.0054, 38.7636),
            last_heartbeat_at: heartbeat_age.map(|age| poll_instant() - age),
            open_incidents: Default::default(),
            machines: Vec::new(),
        }
    }

    pub(super) fn fleet() -> Vec<Center> {
        vec![
            center(
                "ctr-001",
                "Adama Center",
                "Oromia",
                Some(Duration::seconds(90)),
            ),
            center(
                "ctr-002",
                "Bahir Dar Center",
                "Amhara",
                Some(Duration::seconds(300)),
            ),
            center(
                "ctr-003",
                "Jimma Center",
                "Oromia",
                Some(Duration::minutes(45)),
            ),
        ]
    }

    pub(super) fn incident(id: &str, center_id: &str, kind: IncidentType) -> Incident {
        Incident {
            id: id.to_string(),
            kind,
            severity: IncidentSeverity::High,
            scope: IncidentScope {
                center_id: CenterId(center_id.to_string()),
                machine_id: None,
                camera_id: None,
            },
            status: IncidentStatus::Open,
            first_detected_at: poll_instant() - Duration::hours(2),
        }
    }

    pub(super) fn degraded_lane(id: &str) -> MachineDevice {
        MachineDevice {
            id: id.to_string(),
            status: MachineStatus::Offline,
        }
    }
}

mod scoping {
    use super::common::*;
    use fleetwatch::monitoring::scope::{
        filter_by_scope, resolve_scope, Actor, ActorRole, ScopeContext, ScopeKey,
    };

    fn center_key(center: &fleetwatch::monitoring::domain::Center) -> ScopeKey<'_> {
        ScopeKey {
            region: &center.jurisdiction.region,
            id: &center.id.0,
            name: &center.name,
        }
    }

    #[test]
    fn regional_admin_sees_only_their_region() {
        let actor = Actor {
            role: ActorRole::from_descriptor("Regional Admin (Oromia)"),
            region: Some("Oromia".to_string()),
            center: None,
            scope: None,
        };
        let scope = resolve_scope(&actor);
        let visible = filter_by_scope(fleet(), &scope, center_key);

        assert_eq!(visible.len(), 2);
        assert!(visible
            .iter()
            .all(|center| center.jurisdiction.region == "Oromia"));
    }

    #[test]
    fn inspector_sees_exactly_their_center_by_name() {
        let actor = Actor {
            role: ActorRole::from_descriptor("Senior Inspector"),
            region: None,
            center: Some("Bahir Dar Center".to_string()),
            scope: None,
        };
        let visible = filter_by_scope(fleet(), &resolve_scope(&actor), center_key);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.0, "ctr-002");
    }

    #[test]
    fn unknown_role_currently_passes_everything_through() {
        let actor = Actor {
            role: ActorRole::from_descriptor("data analyst"),
            region: None,
            center: None,
            scope: None,
        };
        assert_eq!(resolve_scope(&actor), ScopeContext::National);
        assert_eq!(filter_by_scope(fleet(), &ScopeContext::National, center_key).len(), 3);
    }
}

mod scoring {
    use super::common::*;
    use fleetwatch::monitoring::attention::rank_by_attention;
    use fleetwatch::monitoring::domain::IncidentType;
    use fleetwatch::monitoring::evaluate_fleet;
    use fleetwatch::monitoring::status::CenterStatus;

    #[test]
    fn batch_evaluation_derives_status_per_center() {
        let outcomes = evaluate_fleet(&fleet(), &[], poll_instant());

        assert_eq!(outcomes[0].status, CenterStatus::Online);
        assert_eq!(outcomes[1].status, CenterStatus::Degraded);
        assert_eq!(outcomes[2].status, CenterStatus::Offline);
    }

    #[test]
    fn incidents_only_count_toward_their_own_center() {
        let incidents = vec![
            incident("inc-1", "ctr-003", IncidentType::GeofenceBreach),
            incident("inc-2", "ctr-003", IncidentType::GeofenceBreach),
            incident("inc-3", "ctr-003", IncidentType::EvidenceGap),
            incident("inc-4", "ctr-001", IncidentType::CameraOffline),
        ];
        let outcomes = evaluate_fleet(&fleet(), &incidents, poll_instant());

        // ctr-003: 40 offline + min(15, 6) + min(10, 2) = 48
        assert_eq!(outcomes[2].score, 48);
        assert_eq!(
            outcomes[2].reasons,
            vec![
                "Center offline 45m".to_string(),
                "2 geofence breach(es) today".to_string(),
                "1 evidence gap(s) detected".to_string(),
            ]
        );
        // ctr-001 only carries the camera incident.
        assert_eq!(outcomes[0].score, 5);
        assert_eq!(outcomes[0].reasons, vec!["Camera offline".to_string()]);
    }

    #[test]
    fn attention_ranking_orders_descending_with_stable_ties() {
        let mut centers = fleet();
        centers[0].machines = vec![degraded_lane("lane-1")];

        let outcomes = evaluate_fleet(&centers, &[], poll_instant());
        let ranked = rank_by_attention(outcomes, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].center_id.0, "ctr-003");
        assert_eq!(ranked[1].center_id.0, "ctr-002");
        assert!(ranked[0].score >= ranked[1].score);
    }
}

mod http_surface {
    use super::common::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use fleetwatch::monitoring::domain::IncidentType;
    use fleetwatch::monitoring::router::monitoring_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let app = monitoring_router();
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds");

        let response = app.oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    #[tokio::test]
    async fn overview_endpoint_returns_ranked_scoped_centers() {
        let body = json!({
            "actor": { "role": "National Super Admin" },
            "centers": fleet(),
            "incidents": [incident("inc-1", "ctr-003", IncidentType::GeofenceBreach)],
            "now": poll_instant(),
            "top_n": 2,
        });

        let (status, value) = post_json("/api/v1/fleet/overview", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["scope"]["type"], "national");
        let centers = value["centers"].as_array().expect("array");
        assert_eq!(centers.len(), 2);
        assert_eq!(centers[0]["center_id"], "ctr-003");
        assert_eq!(centers[0]["severity"], "medium");
    }

    #[tokio::test]
    async fn classify_endpoint_bands_a_sample_and_applies_breach_policy() {
        let body = json!({
            "inspection_id": "insp-001",
            "center_id": "ctr-001",
            "sample": { "lat": 9.0054, "lon": 38.7636 },
            "center": { "lat": 9.0200, "lon": 38.7636 },
            "location_source": "gps",
            "confidence": "high",
        });

        let (status, value) = post_json("/api/v1/geofence/classify", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["band"], "RED");
        assert_eq!(value["breach_incident"], true);
        assert!(value["distance_m"].as_f64().expect("distance") > 100.0);
    }

    #[tokio::test]
    async fn classify_endpoint_fails_fast_on_bad_coordinates() {
        let body = json!({
            "inspection_id": "insp-002",
            "center_id": "ctr-001",
            "sample": { "lat": 95.0, "lon": 38.7636 },
            "center": { "lat": 9.0054, "lon": 38.7636 },
            "location_source": "gps",
            "confidence": "med",
        });

        let (status, value) = post_json("/api/v1/geofence/classify", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(value["error"]
            .as_str()
            .expect("error message")
            .contains("latitude"));
    }
}

mod boundary_drawing {
    use fleetwatch::geo::Coordinate;
    use fleetwatch::monitoring::boundary::{BoundaryEditor, PointOutcome};

    #[test]
    fn drawn_triangle_closes_back_onto_its_first_vertex() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        let c = Coordinate::new(1.0, 1.0);

        let mut editor = BoundaryEditor::new();
        editor.start_drawing();
        editor.add_point(a).expect("adds");
        editor.add_point(b).expect("adds");
        editor.add_point(c).expect("adds");

        // Fourth click lands about 30 m from A.
        let outcome = editor
            .add_point(Coordinate::new(0.00027, 0.0))
            .expect("closure click");

        let PointOutcome::Closed(polygon) = outcome else {
            panic!("expected closure, got {outcome:?}");
        };
        assert_eq!(polygon.vertices(), &[a, b, c, a]);
        assert!(!editor.is_drawing());
    }
}
