use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars::JsonSchema;
use validator::Validate;

pub const DEFAULT_REVIEWER_IMAGE: &str = "https://picsum.photos/id/100/50/50";

/// Immutable once created; there is no edit or delete path.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_name: String,
    pub user_image: String,
    pub rating: u8, // 1-5
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Review content before the store assigns identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub media_url: Option<String>,
}

fn default_user_name() -> String {
    "You".to_string()
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewDto {
    #[serde(default = "default_user_name")]
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(custom = "crate::utils::validation::validate_not_blank")]
    pub comment: String,
    pub media_url: Option<String>,
}

impl From<CreateReviewDto> for NewReview {
    fn from(dto: CreateReviewDto) -> Self {
        NewReview {
            user_name: dto.user_name.trim().to_string(),
            rating: dto.rating,
            comment: dto.comment.trim().to_string(),
            media_url: dto.media_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

/// Mean of all review ratings rounded to one decimal; `None` when empty.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(total) / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}
