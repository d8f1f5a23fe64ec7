use serde::{Deserialize, Serialize};

use super::domain::CenterId;
use crate::geo::{haversine_distance_m, Coordinate, GeoError};

/// Distance up to which a sample is fully compliant, inclusive.
pub const GREEN_MAX_DISTANCE_M: f64 = 50.0;
/// Distance up to which a sample is marginal, inclusive.
pub const YELLOW_MAX_DISTANCE_M: f64 = 100.0;

/// Compliance band for an inspection's recorded location relative to its
/// center's authorized coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeofenceBand {
    Green,
    Yellow,
    Red,
}

impl GeofenceBand {
    pub const fn label(self) -> &'static str {
        match self {
            GeofenceBand::Green => "GREEN",
            GeofenceBand::Yellow => "YELLOW",
            GeofenceBand::Red => "RED",
        }
    }
}

/// Confidence annotation supplied by the location source. The classifier
/// passes it through untouched for operator review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationConfidence {
    High,
    Med,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeofenceClassification {
    pub distance_m: f64,
    pub band: GeofenceBand,
}

/// One classified geolocation sample per inspection event; immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeofenceSample {
    pub inspection_id: String,
    pub center_id: CenterId,
    pub coordinate: Coordinate,
    pub distance_m: f64,
    pub band: GeofenceBand,
    pub location_source: String,
    pub confidence: LocationConfidence,
}

/// Band a sample coordinate against a center's authorized coordinate.
///
/// Both coordinates are validated first; an out-of-range input fails fast
/// instead of producing a nonsensical distance. Band upper bounds are
/// inclusive: exactly 50.0 m is GREEN and exactly 100.0 m is YELLOW.
pub fn classify(
    sample: Coordinate,
    center: Coordinate,
) -> Result<GeofenceClassification, GeoError> {
    sample.validate()?;
    center.validate()?;

    let distance_m = haversine_distance_m(sample, center);
    let band = if distance_m <= GREEN_MAX_DISTANCE_M {
        GeofenceBand::Green
    } else if distance_m <= YELLOW_MAX_DISTANCE_M {
        GeofenceBand::Yellow
    } else {
        GeofenceBand::Red
    };

    Ok(GeofenceClassification { distance_m, band })
}

/// Classify and annotate a full sample record.
pub fn classify_sample(
    inspection_id: String,
    center_id: CenterId,
    sample: Coordinate,
    center: Coordinate,
    location_source: String,
    confidence: LocationConfidence,
) -> Result<GeofenceSample, GeoError> {
    let classification = classify(sample, center)?;

    Ok(GeofenceSample {
        inspection_id,
        center_id,
        coordinate: sample,
        distance_m: classification.distance_m,
        band: classification.band,
        location_source,
        confidence,
    })
}

/// Breach policy consumed by the incident-creation collaborator: a RED
/// sample raises a `geofence_breach` incident unless the inspection is on
/// the caller-supplied allow-list.
pub fn requires_breach_incident<F>(sample: &GeofenceSample, allowlisted: F) -> bool
where
    F: Fn(&str) -> bool,
{
    sample.band == GeofenceBand::Red && !allowlisted(&sample.inspection_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Roughly 1 meter of latitude in degrees at the equator.
    const LAT_DEGREE_PER_M: f64 = 1.0 / 111_194.92664455873;

    fn offset_by_m(center: Coordinate, meters: f64) -> Coordinate {
        Coordinate::new(center.lat + meters * LAT_DEGREE_PER_M, center.lon)
    }

    fn center() -> Coordinate {
        Coordinate::new(9.0054, 38.7636)
    }

    #[test]
    fn forty_five_meters_is_green() {
        let result = classify(offset_by_m(center(), 45.0), center()).expect("classifies");
        assert_eq!(result.band, GeofenceBand::Green);
        assert!((result.distance_m - 45.0).abs() < 0.5);
    }

    #[test]
    fn seventy_five_meters_is_yellow() {
        let result = classify(offset_by_m(center(), 75.0), center()).expect("classifies");
        assert_eq!(result.band, GeofenceBand::Yellow);
    }

    #[test]
    fn one_hundred_fifty_meters_is_red() {
        let result = classify(offset_by_m(center(), 150.0), center()).expect("classifies");
        assert_eq!(result.band, GeofenceBand::Red);
    }

    #[test]
    fn band_upper_bounds_are_inclusive() {
        // Nudge just under the thresholds so float error cannot tip the
        // band: the boundary itself must stay in the lower band.
        let just_at_green = classify(offset_by_m(center(), 49.999), center()).expect("classifies");
        assert_eq!(just_at_green.band, GeofenceBand::Green);

        let just_at_yellow =
            classify(offset_by_m(center(), 99.999), center()).expect("classifies");
        assert_eq!(just_at_yellow.band, GeofenceBand::Yellow);
    }

    #[test]
    fn invalid_sample_coordinate_fails_fast() {
        let bad = Coordinate::new(95.0, 38.0);
        assert!(classify(bad, center()).is_err());
    }

    #[test]
    fn confidence_passes_through_unchanged() {
        let sample = classify_sample(
            "insp-001".to_string(),
            CenterId("ctr-001".to_string()),
            offset_by_m(center(), 10.0),
            center(),
            "gps".to_string(),
            LocationConfidence::Low,
        )
        .expect("classifies");
        assert_eq!(sample.confidence, LocationConfidence::Low);
        assert_eq!(sample.band, GeofenceBand::Green);
    }

    #[test]
    fn red_sample_requires_breach_incident_unless_allowlisted() {
        let sample = classify_sample(
            "insp-002".to_string(),
            CenterId("ctr-001".to_string()),
            offset_by_m(center(), 500.0),
            center(),
            "gps".to_string(),
            LocationConfidence::High,
        )
        .expect("classifies");
        assert_eq!(sample.band, GeofenceBand::Red);

        assert!(requires_breach_incident(&sample, |_| false));
        assert!(!requires_breach_incident(&sample, |id| id == "insp-002"));
    }

    #[test]
    fn green_sample_never_raises_a_breach() {
        let sample = classify_sample(
            "insp-003".to_string(),
            CenterId("ctr-001".to_string()),
            center(),
            center(),
            "gps".to_string(),
            LocationConfidence::High,
        )
        .expect("classifies");
        assert!(!requires_breach_incident(&sample, |_| false));
    }

    #[test]
    fn bands_serialize_in_upper_case() {
        let json = serde_json::to_string(&GeofenceBand::Yellow).expect("serializes");
        assert_eq!(json, "\"YELLOW\"");
    }
}
