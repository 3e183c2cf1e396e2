pub mod admin;
pub mod auth;
pub mod booking;
pub mod browse;
pub mod cart;
pub mod category;
pub mod favorite;
pub mod review;
pub mod worker;

#[cfg(test)]
mod tests;

use serde::Deserialize;
use rocket_okapi::okapi::schemars::JsonSchema;
use uuid::Uuid;
use validator::Validate;

use crate::search::Coordinates;
use crate::services::FallbackLocation;
use crate::utils::validation::validate_coordinates;
use crate::utils::ApiError;

/// Optional `?latitude=..&longitude=..` reference point.
#[derive(Debug, Default, FromForm, Deserialize, JsonSchema)]
pub struct OriginQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl OriginQuery {
    /// Both halves present and in range, otherwise the fallback coordinate.
    pub fn resolve(&self, fallback: &FallbackLocation) -> Coordinates {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if validate_coordinates(lat, lon) => Coordinates::new(lat, lon),
            _ => fallback.coords,
        }
    }
}

pub(crate) fn validate_dto<T: Validate>(dto: &T) -> Result<(), ApiError> {
    dto.validate().map_err(ApiError::validation)
}

pub(crate) fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid session ID"))
}
