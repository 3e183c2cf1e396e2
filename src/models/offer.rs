use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    Flat,
    Percentage,
}

/// Promotional offer. Created and deleted by admins, never updated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    /// Percentage points for `percentage`, rupees for `flat`. Not range checked.
    pub value: f64,
    pub valid_till: String,
}

impl Offer {
    /// Badge text shown on the offer card.
    pub fn label(&self) -> String {
        match self.offer_type {
            OfferType::Percentage => format!("{}% OFF", self.value),
            OfferType::Flat => format!("₹{} FLAT", self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    pub title: String,
    pub description: String,
    pub offer_type: OfferType,
    pub value: f64,
    pub valid_till: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferDto {
    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default = "default_offer_type")]
    pub offer_type: OfferType,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub valid_till: String,
}

fn default_offer_type() -> OfferType {
    OfferType::Percentage
}

impl From<CreateOfferDto> for NewOffer {
    fn from(dto: CreateOfferDto) -> Self {
        NewOffer {
            title: dto.title.trim().to_string(),
            description: dto.description,
            offer_type: dto.offer_type,
            value: dto.value,
            valid_till: dto.valid_till,
        }
    }
}
