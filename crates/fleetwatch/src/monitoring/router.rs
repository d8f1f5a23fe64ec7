use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::attention::{rank_by_attention, AttentionOutcome};
use super::domain::{Center, CenterId, Incident};
use super::evaluate_fleet;
use super::geofence::{
    classify_sample, requires_breach_incident, GeofenceSample, LocationConfidence,
};
use super::scope::{filter_by_scope, resolve_scope, Actor, ActorRole, ScopeContext, ScopeKey};
use crate::geo::Coordinate;

/// Router exposing the scoring pipeline and the geofence classifier. The
/// evaluators are stateless, so the router carries no shared state.
pub fn monitoring_router() -> Router {
    Router::new()
        .route("/api/v1/fleet/overview", post(overview_handler))
        .route("/api/v1/geofence/classify", post(classify_handler))
}

/// Caller descriptor as the upstream auth layer emits it: a free-form
/// role string plus optional assignments.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorDescriptor {
    pub role: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub center: Option<String>,
    #[serde(default)]
    pub scope: Option<ScopeContext>,
}

impl From<ActorDescriptor> for Actor {
    fn from(descriptor: ActorDescriptor) -> Self {
        Actor {
            role: ActorRole::from_descriptor(&descriptor.role),
            region: descriptor.region,
            center: descriptor.center,
            scope: descriptor.scope,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FleetOverviewRequest {
    pub actor: ActorDescriptor,
    pub centers: Vec<Center>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    /// Evaluation instant; defaults to the wall clock so replayed batches
    /// can pin a timestamp.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FleetOverviewResponse {
    pub scope: ScopeContext,
    pub evaluated_at: DateTime<Utc>,
    pub centers: Vec<AttentionOutcome>,
}

fn center_scope_key(center: &Center) -> ScopeKey<'_> {
    ScopeKey {
        region: &center.jurisdiction.region,
        id: &center.id.0,
        name: &center.name,
    }
}

pub(crate) async fn overview_handler(
    Json(payload): Json<FleetOverviewRequest>,
) -> Json<FleetOverviewResponse> {
    let actor = Actor::from(payload.actor);
    let scope = resolve_scope(&actor);

    let centers = filter_by_scope(payload.centers, &scope, center_scope_key);

    // Incidents follow the centers that survived scoping.
    let incidents: Vec<Incident> = payload
        .incidents
        .into_iter()
        .filter(|incident| centers.iter().any(|center| center.id == incident.scope.center_id))
        .collect();

    let now = payload.now.unwrap_or_else(Utc::now);
    let outcomes = evaluate_fleet(&centers, &incidents, now);
    let ranked = rank_by_attention(outcomes, payload.top_n.unwrap_or(usize::MAX));

    Json(FleetOverviewResponse {
        scope,
        evaluated_at: now,
        centers: ranked,
    })
}

#[derive(Debug, Deserialize)]
pub struct GeofenceClassifyRequest {
    pub inspection_id: String,
    pub center_id: CenterId,
    pub sample: Coordinate,
    pub center: Coordinate,
    pub location_source: String,
    pub confidence: LocationConfidence,
    /// Allow-list verdict supplied by the external exemption mechanism.
    #[serde(default)]
    pub allowlisted: bool,
}

#[derive(Debug, Serialize)]
pub struct GeofenceClassifyResponse {
    #[serde(flatten)]
    pub sample: GeofenceSample,
    pub breach_incident: bool,
}

pub(crate) async fn classify_handler(Json(payload): Json<GeofenceClassifyRequest>) -> Response {
    let allowlisted = payload.allowlisted;
    match classify_sample(
        payload.inspection_id,
        payload.center_id,
        payload.sample,
        payload.center,
        payload.location_source,
        payload.confidence,
    ) {
        Ok(sample) => {
            let breach_incident = requires_breach_incident(&sample, |_| allowlisted);
            (
                StatusCode::OK,
                Json(GeofenceClassifyResponse {
                    sample,
                    breach_incident,
                }),
            )
                .into_response()
        }
        Err(error) => {
            let body = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
    }
}
