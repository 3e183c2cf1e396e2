use log::info;
use rocket::http::Header;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;

use crate::guards::AdminGuard;
use crate::models::{find_category, Category, CreateOfferDto, Offer, Worker, WorkerDto, WorkerId};
use crate::routes::validate_dto;
use crate::services::csv_export::{workers_to_csv, EXPORT_FILE_NAME};
use crate::state::AppState;
use crate::store::{dashboard_stats, DashboardStats};
use crate::utils::{ApiError, ApiResponse};

const NO_SUCH_WORKER: &str = "No such worker";

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResult {
    pub worker_id: WorkerId,
    pub value: bool,
}

#[derive(Responder)]
#[response(content_type = "text/csv")]
pub struct CsvDownload {
    body: String,
    disposition: Header<'static>,
}

fn catalogue_category(category_id: &str) -> Result<Category, ApiError> {
    find_category(category_id)
        .copied()
        .ok_or_else(|| ApiError::bad_request(format!("Unknown category '{}'", category_id)))
}

/* ----------------------------- Workers ----------------------------- */

#[openapi(tag = "Admin")]
#[get("/admin/workers")]
pub async fn get_admin_workers(state: &State<AppState>, _admin: AdminGuard) -> Json<ApiResponse<Vec<Worker>>> {
    let store = state.store.read().await;
    Json(ApiResponse::success(store.workers().to_vec()))
}

#[openapi(tag = "Admin")]
#[post("/admin/workers", data = "<dto>")]
pub async fn create_worker(
    state: &State<AppState>,
    admin: AdminGuard,
    dto: Json<WorkerDto>,
) -> Result<Json<ApiResponse<Worker>>, ApiError> {
    let dto = dto.into_inner();
    validate_dto(&dto)?;
    let category = catalogue_category(&dto.category_id)?;

    let mut store = state.store.write().await;
    let id = store.add_worker(dto.into_draft(&category));
    info!("Admin '{}' added worker {}", admin.username, id);
    let worker = store
        .get_worker(id)
        .cloned()
        .ok_or_else(|| ApiError::internal_error("Worker vanished after insert"))?;

    Ok(Json(ApiResponse::success_with_message(
        "Worker added successfully!".to_string(),
        worker,
    )))
}

#[openapi(tag = "Admin")]
#[put("/admin/workers/<worker_id>", data = "<dto>")]
pub async fn update_worker(
    state: &State<AppState>,
    admin: AdminGuard,
    worker_id: WorkerId,
    dto: Json<WorkerDto>,
) -> Result<Json<ApiResponse<Worker>>, ApiError> {
    let dto = dto.into_inner();
    validate_dto(&dto)?;
    let category = catalogue_category(&dto.category_id)?;

    let mut store = state.store.write().await;
    let Some(existing) = store.get_worker(worker_id).cloned() else {
        return Ok(Json(ApiResponse::info(NO_SUCH_WORKER)));
    };

    store.update_worker(dto.apply_to(&existing, &category));
    info!("Admin '{}' updated worker {}", admin.username, worker_id);
    let updated = store.get_worker(worker_id).cloned();

    Ok(Json(match updated {
        Some(worker) => ApiResponse::success_with_message("Worker updated successfully!".to_string(), worker),
        None => ApiResponse::info(NO_SUCH_WORKER),
    }))
}

#[openapi(tag = "Admin")]
#[delete("/admin/workers/<worker_id>")]
pub async fn delete_worker(
    state: &State<AppState>,
    admin: AdminGuard,
    worker_id: WorkerId,
) -> Json<ApiResponse<WorkerId>> {
    if state.store.write().await.delete_worker(worker_id) {
        info!("Admin '{}' deleted worker {}", admin.username, worker_id);
        Json(ApiResponse::success_with_message("Worker deleted.".to_string(), worker_id))
    } else {
        Json(ApiResponse::info(NO_SUCH_WORKER))
    }
}

#[openapi(tag = "Admin")]
#[post("/admin/workers/<worker_id>/verified")]
pub async fn toggle_verified(
    state: &State<AppState>,
    _admin: AdminGuard,
    worker_id: WorkerId,
) -> Json<ApiResponse<ToggleResult>> {
    match state.store.write().await.toggle_verified(worker_id) {
        Some(value) => Json(ApiResponse::success(ToggleResult { worker_id, value })),
        None => Json(ApiResponse::info(NO_SUCH_WORKER)),
    }
}

#[openapi(tag = "Admin")]
#[post("/admin/workers/<worker_id>/featured")]
pub async fn toggle_featured(
    state: &State<AppState>,
    _admin: AdminGuard,
    worker_id: WorkerId,
) -> Json<ApiResponse<ToggleResult>> {
    match state.store.write().await.toggle_featured(worker_id) {
        Some(value) => Json(ApiResponse::success(ToggleResult { worker_id, value })),
        None => Json(ApiResponse::info(NO_SUCH_WORKER)),
    }
}

#[openapi(skip)]
#[get("/admin/workers/export")]
pub async fn export_workers(state: &State<AppState>, _admin: AdminGuard) -> CsvDownload {
    let store = state.store.read().await;
    CsvDownload {
        body: workers_to_csv(store.workers()),
        disposition: Header::new(
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
        ),
    }
}

#[openapi(tag = "Admin")]
#[get("/admin/dashboard")]
pub async fn get_dashboard(state: &State<AppState>, _admin: AdminGuard) -> Json<ApiResponse<DashboardStats>> {
    let store = state.store.read().await;
    Json(ApiResponse::success(dashboard_stats(store.workers())))
}

/* ----------------------------- Offers ----------------------------- */

#[openapi(tag = "Admin")]
#[get("/admin/offers")]
pub async fn get_offers(state: &State<AppState>, _admin: AdminGuard) -> Json<ApiResponse<Vec<Offer>>> {
    let store = state.store.read().await;
    Json(ApiResponse::success(store.offers().to_vec()))
}

#[openapi(tag = "Admin")]
#[post("/admin/offers", data = "<dto>")]
pub async fn create_offer(
    state: &State<AppState>,
    _admin: AdminGuard,
    dto: Json<CreateOfferDto>,
) -> Result<Json<ApiResponse<Offer>>, ApiError> {
    let dto = dto.into_inner();
    validate_dto(&dto)?;

    let offer = state.store.write().await.add_offer(dto.into());
    Ok(Json(ApiResponse::success_with_message(
        format!("Offer '{}' created ({})", offer.title, offer.label()),
        offer,
    )))
}

#[openapi(tag = "Admin")]
#[delete("/admin/offers/<offer_id>")]
pub async fn delete_offer(
    state: &State<AppState>,
    _admin: AdminGuard,
    offer_id: String,
) -> Json<ApiResponse<String>> {
    if state.store.write().await.delete_offer(&offer_id) {
        Json(ApiResponse::success_with_message("Offer deleted".to_string(), offer_id))
    } else {
        Json(ApiResponse::info("No such offer"))
    }
}
