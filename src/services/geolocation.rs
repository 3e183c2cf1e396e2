use log::warn;
use serde::Serialize;
use rocket_okapi::okapi::schemars::JsonSchema;

use crate::config::Config;
use crate::search::{Coordinates, CURRENT_LOCATION};
use crate::utils::validation::validate_coordinates;

/// Where searches are anchored when the client cannot report a position.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackLocation {
    pub coords: Coordinates,
    pub city: String,
}

impl FallbackLocation {
    pub fn from_config() -> Self {
        FallbackLocation {
            coords: Coordinates::new(Config::default_latitude(), Config::default_longitude()),
            city: Config::default_city(),
        }
    }

    pub fn as_pair(&self) -> (f64, f64) {
        (self.coords.latitude, self.coords.longitude)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, JsonSchema)]
pub struct ResolvedLocation {
    pub coords: Coordinates,
    pub label: String,
    /// `true` when the reported position was missing or unusable.
    pub fell_back: bool,
}

/// Turns a client-reported position (or its absence) into a search origin.
pub fn resolve_position(reported: Option<Coordinates>, fallback: &FallbackLocation) -> ResolvedLocation {
    match reported {
        Some(coords) if validate_coordinates(coords.latitude, coords.longitude) => ResolvedLocation {
            coords,
            label: CURRENT_LOCATION.to_string(),
            fell_back: false,
        },
        reported => {
            if let Some(coords) = reported {
                warn!(
                    "Ignoring out-of-range position ({}, {}), using {}",
                    coords.latitude, coords.longitude, fallback.city
                );
            }
            ResolvedLocation {
                coords: fallback.coords,
                label: fallback.city.clone(),
                fell_back: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hyderabad() -> FallbackLocation {
        FallbackLocation {
            coords: Coordinates::new(17.385, 78.4867),
            city: "Hyderabad".to_string(),
        }
    }

    #[test]
    fn reported_position_is_used() {
        let resolved = resolve_position(Some(Coordinates::new(17.4401, 78.3489)), &hyderabad());
        assert_eq!(resolved.coords, Coordinates::new(17.4401, 78.3489));
        assert_eq!(resolved.label, CURRENT_LOCATION);
        assert!(!resolved.fell_back);
    }

    #[test]
    fn failure_uses_default_city() {
        let resolved = resolve_position(None, &hyderabad());
        assert_eq!(resolved.coords, hyderabad().coords);
        assert_eq!(resolved.label, "Hyderabad");
        assert!(resolved.fell_back);
    }

    #[test]
    fn out_of_range_position_falls_back() {
        let resolved = resolve_position(Some(Coordinates::new(123.0, 78.0)), &hyderabad());
        assert!(resolved.fell_back);
        assert_eq!(resolved.label, "Hyderabad");
    }
}
