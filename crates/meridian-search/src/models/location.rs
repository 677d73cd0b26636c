//! Geographic points and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers used by [`haversine`].
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// A latitude/longitude pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location from degrees of latitude and longitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The `(latitude, longitude)` pair.
    pub fn tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Great-circle distance to `other`, in kilometers.
    pub fn distance(&self, other: &Location) -> f64 {
        haversine(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location(latitude={},longitude={})", self.latitude, self.longitude)
    }
}

/// Haversine distance in kilometers between two points given in degrees.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) =
        (lat1.to_radians(), lon1.to_radians(), lat2.to_radians(), lon2.to_radians());
    let sin_lat = ((lat2 - lat1) * 0.5).sin();
    let sin_lon = ((lon2 - lon1) * 0.5).sin();
    let h = sin_lat.mul_add(sin_lat, sin_lon * sin_lon * lat1.cos() * lat2.cos());
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_accessors() {
        let location = Location::new(1.1, 2.2);
        assert_eq!(location.latitude(), 1.1);
        assert_eq!(location.longitude(), 2.2);
        assert_eq!(location.tuple(), (1.1, 2.2));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let location = Location::new(1.1, 2.2);
        assert_eq!(location.distance(&Location::new(1.1, 2.2)), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let london = Location::new(51.5074, -0.1278);
        let paris = Location::new(48.8566, 2.3522);
        assert!((london.distance(&paris) - paris.distance(&london)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_london_paris() {
        let london = Location::new(51.5074, -0.1278);
        let paris = Location::new(48.8566, 2.3522);
        let d = london.distance(&paris);
        assert!((d - 343.6).abs() < 1.0, "unexpected distance {d}");
    }

    #[test]
    fn test_quarter_meridian() {
        let d = haversine(0.0, 0.0, 90.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_location_display() {
        let location = Location::new(1.1, 2.2);
        assert_eq!(location.to_string(), "Location(latitude=1.1,longitude=2.2)");
    }

    #[test]
    fn test_location_serde() {
        let location = Location::new(52.2, 0.12);
        let json = serde_json::to_string(&location).unwrap();
        assert_eq!(json, r#"{"latitude":52.2,"longitude":0.12}"#);
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, location);
    }
}
