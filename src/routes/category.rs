use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;

use crate::models::{find_category, Category, CategorySection, Worker, CATEGORY_SECTIONS};
use crate::routes::OriginQuery;
use crate::search::search_by_category;
use crate::state::AppState;
use crate::utils::{ApiError, ApiResponse};

#[derive(Debug, Serialize, JsonSchema)]
pub struct CategoryWorkers {
    pub category: Category,
    pub title: String,
    pub workers: Vec<Worker>,
}

#[openapi(tag = "Category")]
#[get("/categories")]
pub async fn get_all_categories() -> Json<ApiResponse<Vec<CategorySection>>> {
    Json(ApiResponse::success(CATEGORY_SECTIONS.to_vec()))
}

#[openapi(tag = "Category")]
#[get("/categories/<category_id>")]
pub async fn get_category(category_id: String) -> Result<Json<ApiResponse<Category>>, ApiError> {
    find_category(&category_id)
        .map(|category| Json(ApiResponse::success(*category)))
        .ok_or_else(|| ApiError::not_found("Category not found"))
}

/// Workers of one category, nearest first.
#[openapi(tag = "Category")]
#[get("/categories/<category_id>/workers?<origin..>")]
pub async fn get_category_workers(
    state: &State<AppState>,
    category_id: String,
    origin: OriginQuery,
) -> Result<Json<ApiResponse<CategoryWorkers>>, ApiError> {
    let category = *find_category(&category_id).ok_or_else(|| ApiError::not_found("Category not found"))?;
    let origin = origin.resolve(&state.fallback);

    let store = state.store.read().await;
    let workers = search_by_category(store.workers(), category.id, origin);

    Ok(Json(ApiResponse::success(CategoryWorkers {
        category,
        title: format!("Available {}", category.name),
        workers,
    })))
}
