use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;

use crate::models::{Worker, WorkerId};
use crate::state::AppState;
use crate::utils::ApiResponse;

#[derive(Debug, Serialize, JsonSchema)]
pub struct Favorites {
    pub ids: Vec<WorkerId>,
    /// Favorites that still resolve to a worker.
    pub workers: Vec<Worker>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteState {
    pub worker_id: WorkerId,
    pub favorite: bool,
}

#[openapi(tag = "Favorite")]
#[get("/favorites")]
pub async fn get_favorites(state: &State<AppState>) -> Json<ApiResponse<Favorites>> {
    let store = state.store.read().await;
    let ids = store.favorites().to_vec();
    let workers = ids.iter().filter_map(|id| store.get_worker(*id)).cloned().collect();

    Json(ApiResponse::success(Favorites { ids, workers }))
}

#[openapi(tag = "Favorite")]
#[post("/favorites/<worker_id>/toggle")]
pub async fn toggle_favorite(state: &State<AppState>, worker_id: WorkerId) -> Json<ApiResponse<FavoriteState>> {
    let favorite = state.store.write().await.toggle_favorite(worker_id);
    Json(ApiResponse::success(FavoriteState { worker_id, favorite }))
}
