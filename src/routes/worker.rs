use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Deserialize;

use crate::models::{Worker, WorkerId};
use crate::routes::OriginQuery;
use crate::search::{
    featured_workers, known_locations, location_suggestions, refine, search_by_text, sort_workers,
    Coordinates, SearchQuery, SortMode,
};
use crate::state::AppState;
use crate::utils::validation::validate_coordinates;
use crate::utils::{ApiError, ApiResponse};

#[openapi(tag = "Worker")]
#[get("/workers")]
pub async fn get_all_workers(state: &State<AppState>) -> Json<ApiResponse<Vec<Worker>>> {
    let store = state.store.read().await;
    Json(ApiResponse::success(store.workers().to_vec()))
}

#[openapi(tag = "Worker")]
#[get("/workers/<worker_id>")]
pub async fn get_worker_by_id(
    state: &State<AppState>,
    worker_id: WorkerId,
) -> Result<Json<ApiResponse<Worker>>, ApiError> {
    let store = state.store.read().await;
    let worker = store
        .get_worker(worker_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Worker not found"))?;

    Ok(Json(ApiResponse::success(worker)))
}

#[openapi(tag = "Worker")]
#[get("/workers/featured?<origin..>")]
pub async fn get_featured_workers(
    state: &State<AppState>,
    origin: OriginQuery,
) -> Json<ApiResponse<Vec<Worker>>> {
    let origin = origin.resolve(&state.fallback);
    let store = state.store.read().await;
    Json(ApiResponse::success(featured_workers(store.workers(), origin)))
}

#[derive(Debug, Default, FromForm, Deserialize, JsonSchema)]
pub struct WorkerSearchQuery {
    pub service: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Narrows the results by name or service area.
    pub refine: Option<String>,
    /// `recommended`, `top-rated`, `most-experienced` or `most-jobs`.
    pub sort: Option<String>,
}

/// One-shot search for clients that keep their own browse state.
#[openapi(tag = "Worker")]
#[get("/workers/search?<query..>")]
pub async fn search_workers(
    state: &State<AppState>,
    query: WorkerSearchQuery,
) -> Result<Json<ApiResponse<Vec<Worker>>>, ApiError> {
    let sort: SortMode = query
        .sort
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(ApiError::bad_request)?;

    let origin = match (query.latitude, query.longitude) {
        (Some(lat), Some(lon)) if !validate_coordinates(lat, lon) => {
            return Err(ApiError::bad_request("Invalid coordinates"));
        }
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon),
        _ => state.fallback.coords,
    };

    let search = SearchQuery {
        service: query.service.unwrap_or_default(),
        location: query.location.unwrap_or_default(),
    };

    let store = state.store.read().await;
    let Some(results) = search_by_text(store.workers(), &search, origin) else {
        return Ok(Json(ApiResponse::info("Enter a service or location to search")));
    };

    let mut results = refine(&results, query.refine.as_deref().unwrap_or_default());
    sort_workers(&mut results, sort);

    Ok(Json(ApiResponse::success(results)))
}

#[openapi(tag = "Location")]
#[get("/locations")]
pub async fn get_locations(state: &State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    let store = state.store.read().await;
    Json(ApiResponse::success(known_locations(store.workers())))
}

#[openapi(tag = "Location")]
#[get("/locations/suggest?<q>")]
pub async fn suggest_locations(state: &State<AppState>, q: Option<String>) -> Json<ApiResponse<Vec<String>>> {
    let store = state.store.read().await;
    Json(ApiResponse::success(location_suggestions(
        store.workers(),
        q.as_deref().unwrap_or_default(),
    )))
}
