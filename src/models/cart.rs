use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;
use validator::Validate;

use crate::models::WorkerId;

/// One line per worker; there is no quantity.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub worker_id: WorkerId,
    #[validate(length(min = 1))]
    pub worker_name: String,
    pub service_name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(|item| item.price).sum()
}
