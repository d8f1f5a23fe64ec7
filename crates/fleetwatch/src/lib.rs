//! Fleet health and compliance scoring engine for vehicle-inspection
//! center monitoring.
//!
//! The crate turns already-collected telemetry facts (heartbeats,
//! geolocation samples, incident records) into operator-facing signals:
//! derived liveness status, a 0-100 attention score with a short reason
//! trail, geofence compliance bands, and a closed geofence boundary
//! polygon drawn interactively. Every evaluator is pure and deterministic;
//! ingestion, persistence, and notification delivery live elsewhere.

pub mod config;
pub mod error;
pub mod geo;
pub mod monitoring;
pub mod telemetry;
