use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, JsonSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates { latitude, longitude }
    }

    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Haversine great-circle distance in kilometres. Inputs are not range checked.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km(17.4948, 78.4, 17.4948, 78.4), 0.0);
    }

    #[test]
    fn kukatpally_to_gachibowli() {
        let d = distance_km(17.4948, 78.4000, 17.4401, 78.3489);
        assert!((d - 8.147).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn symmetric_and_non_negative() {
        let a = Coordinates::new(17.385, 78.4867);
        let b = Coordinates::new(-33.8688, 151.2093);
        let ab = a.distance_to(&b);
        assert!(ab > 0.0);
        assert!((ab - b.distance_to(&a)).abs() < 1e-9);
    }

    #[test]
    fn quarter_meridian() {
        let d = distance_km(0.0, 0.0, 90.0, 0.0);
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
