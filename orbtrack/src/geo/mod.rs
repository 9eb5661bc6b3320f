//! Geographic coordinates and interpolation math.
//!
//! Positions are plain latitude/longitude pairs in decimal degrees. All
//! interpolation happens in lat/lon space (not along great circles); the only
//! spherical concern handled here is the antimeridian, where longitude wraps
//! from +180° to -180°.

mod lerp;

pub use lerp::{
    crosses_antimeridian, ease, lerp, lerp_longitude, longitude_delta, normalize_longitude,
};

use std::fmt;

use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors for coordinates that cannot be placed on the globe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude or longitude is NaN or infinite.
    #[error("Non-finite coordinate: lat={lat}, lon={lon}")]
    NonFiniteCoordinate { lat: f64, lon: f64 },

    /// Latitude outside [-90, 90].
    #[error("Latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180].
    #[error("Longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A position on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point without validation.
    ///
    /// Use [`GeoPoint::try_new`] for data coming from outside the process.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a point, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let point = Self::new(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Check that both coordinates are finite and within range.
    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(GeoError::NonFiniteCoordinate {
                lat: self.latitude,
                lon: self.longitude,
            });
        }
        if !(MIN_LAT..=MAX_LAT).contains(&self.latitude) {
            return Err(GeoError::LatitudeOutOfRange(self.latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&self.longitude) {
            return Err(GeoError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Interpolate towards `target` at fraction `t`.
    ///
    /// Latitude is interpolated linearly; longitude takes the shorter way
    /// around the globe and stays within [-180, 180].
    pub fn interpolate(&self, target: &GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            latitude: lerp(self.latitude, target.latitude, t),
            longitude: lerp_longitude(self.longitude, target.longitude, t),
        }
    }

    /// True if both coordinates differ from `other` by less than `epsilon` degrees.
    pub fn approx_eq(&self, other: &GeoPoint, epsilon: f64) -> bool {
        (self.latitude - other.latitude).abs() < epsilon
            && (self.longitude - other.longitude).abs() < epsilon
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_hem = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let lon_hem = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.latitude.abs(),
            lat_hem,
            self.longitude.abs(),
            lon_hem
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_accepts_valid_coordinates() {
        assert!(GeoPoint::try_new(51.5, -0.1).is_ok());
        assert!(GeoPoint::try_new(-90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(90.0, -180.0).is_ok());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert_eq!(
            GeoPoint::try_new(90.5, 0.0),
            Err(GeoError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            GeoPoint::try_new(0.0, -180.01),
            Err(GeoError::LongitudeOutOfRange(-180.01))
        );
    }

    #[test]
    fn test_try_new_rejects_non_finite() {
        assert!(matches!(
            GeoPoint::try_new(f64::NAN, 0.0),
            Err(GeoError::NonFiniteCoordinate { .. })
        ));
        assert!(matches!(
            GeoPoint::try_new(0.0, f64::INFINITY),
            Err(GeoError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn test_origin_is_a_valid_position() {
        // (0, 0) is a real place in the Gulf of Guinea, not "no data".
        assert!(GeoPoint::try_new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_interpolate_across_antimeridian() {
        let a = GeoPoint::new(10.0, 175.0);
        let b = GeoPoint::new(20.0, -175.0);
        let mid = a.interpolate(&b, 0.5);
        assert!((mid.latitude - 15.0).abs() < 1e-9);
        assert!((mid.longitude.abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_approx_eq() {
        let a = GeoPoint::new(10.0, 20.0);
        assert!(a.approx_eq(&GeoPoint::new(10.0 + 1e-9, 20.0), 1e-6));
        assert!(!a.approx_eq(&GeoPoint::new(10.0, 20.001), 1e-6));
    }

    #[test]
    fn test_display_hemispheres() {
        assert_eq!(GeoPoint::new(51.5, -0.1).to_string(), "51.5000°N 0.1000°W");
        assert_eq!(GeoPoint::new(-33.9, 151.2).to_string(), "33.9000°S 151.2000°E");
    }
}
