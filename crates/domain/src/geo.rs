//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mean Earth radius in meters, spherical approximation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, valid range [-90, 90].
    pub latitude: f64,
    /// Longitude in decimal degrees, valid range [-180, 180].
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point without validating it; call [`GeoPoint::validate`]
    /// before trusting coordinates from an external source.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both coordinates are finite and within range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinates`] when either coordinate
    /// is NaN, infinite, or outside [-90, 90] / [-180, 180].
    pub fn validate(self) -> Result<(), ValidationError> {
        // `contains` is false for NaN, so non-finite values fail both checks.
        let lat_ok = (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok && self.latitude.is_finite() && self.longitude.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Great-circle distance to `other` in meters, via the Haversine formula
    /// on a sphere of radius [`EARTH_RADIUS_M`].
    ///
    /// Numeric error is negligible at the meter-to-kilometer scale this
    /// engine operates on.
    #[must_use]
    pub fn distance_m(self, other: Self) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let delta_phi = (other.latitude - self.latitude).to_radians();
        let delta_lambda = (other.longitude - self.longitude).to_radians();

        let a = (delta_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}
