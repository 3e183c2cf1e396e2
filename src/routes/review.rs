use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::models::{CreateReviewDto, Review, WorkerId};
use crate::routes::validate_dto;
use crate::state::AppState;
use crate::utils::{ApiError, ApiResponse};

/// Reviews for an unknown worker are a no-op.
#[openapi(tag = "Review")]
#[post("/workers/<worker_id>/reviews", data = "<dto>")]
pub async fn create_review(
    state: &State<AppState>,
    worker_id: WorkerId,
    dto: Json<CreateReviewDto>,
) -> Result<Json<ApiResponse<Review>>, ApiError> {
    let dto = dto.into_inner();
    validate_dto(&dto)?;

    let mut store = state.store.write().await;
    Ok(Json(match store.add_review(worker_id, dto.into()) {
        Some(review) => ApiResponse::success_with_message("Thank you for your review!".to_string(), review),
        None => ApiResponse::info("No such worker"),
    }))
}

#[openapi(tag = "Review")]
#[get("/workers/<worker_id>/reviews")]
pub async fn get_worker_reviews(
    state: &State<AppState>,
    worker_id: WorkerId,
) -> Result<Json<ApiResponse<Vec<Review>>>, ApiError> {
    let store = state.store.read().await;
    let worker = store
        .get_worker(worker_id)
        .ok_or_else(|| ApiError::not_found("Worker not found"))?;

    Ok(Json(ApiResponse::success(worker.reviews.clone())))
}
