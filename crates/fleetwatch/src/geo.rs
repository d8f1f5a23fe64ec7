use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Validation errors for raw coordinate input.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),
}

/// WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Reject out-of-range or non-finite coordinates before any distance
    /// math runs on them.
    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(GeoError::InvalidLatitude(self.lat));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(GeoError::InvalidLongitude(self.lon));
        }
        Ok(())
    }
}

/// Great-circle distance in meters between two coordinates (haversine).
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_are_zero_meters() {
        let addis = Coordinate::new(9.0054, 38.7636);
        assert_eq!(haversine_distance_m(addis, addis), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Coordinate::new(9.0, 38.0);
        let b = Coordinate::new(10.0, 38.0);
        let distance = haversine_distance_m(a, b);
        // pi / 180 * 6_371_000
        assert!((distance - 111_194.93).abs() < 1.0, "got {distance}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(9.0054, 38.7636);
        let b = Coordinate::new(8.9806, 38.7578);
        assert_eq!(haversine_distance_m(a, b), haversine_distance_m(b, a));
    }

    #[test]
    fn latitude_out_of_range_is_rejected() {
        let bad = Coordinate::new(91.0, 38.0);
        assert!(matches!(bad.validate(), Err(GeoError::InvalidLatitude(_))));
    }

    #[test]
    fn longitude_out_of_range_is_rejected() {
        let bad = Coordinate::new(9.0, -180.5);
        assert!(matches!(bad.validate(), Err(GeoError::InvalidLongitude(_))));
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let bad = Coordinate::new(f64::NAN, 38.0);
        assert!(bad.validate().is_err());
    }
}
