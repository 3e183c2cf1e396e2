//! Server-held browse sessions: one per client screen, carrying the search
//! origin, the list on display and the category tip.

use std::collections::HashMap;

use log::info;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::find_category;
use crate::routes::parse_session_id;
use crate::search::{BrowseSession, Coordinates, SearchQuery, SessionView, SortMode};
use crate::services::resolve_position;
use crate::state::AppState;
use crate::utils::{ApiError, ApiResponse};

/// Position reported by the client; leave both out when detection failed.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct LocationDto {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationDto {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RefineDto {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SortDto {
    pub mode: SortMode,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenedSession {
    pub session_id: String,
    pub view: SessionView,
}

const NOT_FOUND: &str = "Browse session not found";
const LOCATION_FAILED: &str = "Could not get your location.";

/// Looks the session up and marks it as used.
fn session_mut(sessions: &mut HashMap<Uuid, BrowseSession>, id: Uuid) -> Result<&mut BrowseSession, ApiError> {
    let session = sessions.get_mut(&id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    session.touch();
    Ok(session)
}

#[openapi(tag = "Browse")]
#[post("/browse", data = "<dto>")]
pub async fn open_session(
    state: &State<AppState>,
    dto: Json<LocationDto>,
) -> Json<ApiResponse<OpenedSession>> {
    let location = resolve_position(dto.coordinates(), &state.fallback);
    let session = BrowseSession::new(location.coords, location.label);

    let view = session.view();
    let id = state.insert_session(session).await;
    info!("Browse session {} opened", id);

    Json(ApiResponse::success(OpenedSession {
        session_id: id.to_string(),
        view,
    }))
}

#[openapi(tag = "Browse")]
#[get("/browse/<session_id>")]
pub async fn get_session(
    state: &State<AppState>,
    session_id: String,
) -> Result<Json<ApiResponse<SessionView>>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let mut sessions = state.sessions.write().await;
    let view = session_mut(&mut sessions, id)?.view();
    Ok(Json(ApiResponse::success(view)))
}

#[openapi(tag = "Browse")]
#[put("/browse/<session_id>/location", data = "<dto>")]
pub async fn report_location(
    state: &State<AppState>,
    session_id: String,
    dto: Json<LocationDto>,
) -> Result<Json<ApiResponse<SessionView>>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let location = resolve_position(dto.coordinates(), &state.fallback);

    let mut sessions = state.sessions.write().await;
    let session = session_mut(&mut sessions, id)?;
    session.set_location(location.coords, location.label);
    let view = session.view();

    Ok(Json(if location.fell_back {
        ApiResponse::success_with_message(LOCATION_FAILED.to_string(), view)
    } else {
        ApiResponse::success(view)
    }))
}

/// Shows the category list right away; the tip follows in the background.
#[openapi(tag = "Browse")]
#[post("/browse/<session_id>/category/<category_id>")]
pub async fn select_category(
    state: &State<AppState>,
    session_id: String,
    category_id: String,
) -> Result<Json<ApiResponse<SessionView>>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let category = *find_category(&category_id).ok_or_else(|| ApiError::not_found("Category not found"))?;

    let store = state.store.read().await;
    let mut sessions = state.sessions.write().await;
    let session = session_mut(&mut sessions, id)?;

    let request = session.select_category(store.workers(), category);
    let view = session.view();
    drop(sessions);
    drop(store);

    state.spawn_tip(id, request);

    Ok(Json(ApiResponse::success(view)))
}

#[openapi(tag = "Browse")]
#[post("/browse/<session_id>/search", data = "<query>")]
pub async fn search(
    state: &State<AppState>,
    session_id: String,
    query: Json<SearchQuery>,
) -> Result<Json<ApiResponse<SessionView>>, ApiError> {
    let id = parse_session_id(&session_id)?;

    let store = state.store.read().await;
    let mut sessions = state.sessions.write().await;
    let session = session_mut(&mut sessions, id)?;

    let searched = session.search(store.workers(), &query);
    let view = session.view();

    Ok(Json(if searched {
        ApiResponse::success(view)
    } else {
        ApiResponse::success_with_message("Enter a service or location to search".to_string(), view)
    }))
}

#[openapi(tag = "Browse")]
#[put("/browse/<session_id>/refine", data = "<dto>")]
pub async fn refine(
    state: &State<AppState>,
    session_id: String,
    dto: Json<RefineDto>,
) -> Result<Json<ApiResponse<SessionView>>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let mut sessions = state.sessions.write().await;
    let session = session_mut(&mut sessions, id)?;

    session.set_refine_term(dto.into_inner().term);
    Ok(Json(ApiResponse::success(session.view())))
}

#[openapi(tag = "Browse")]
#[put("/browse/<session_id>/sort", data = "<dto>")]
pub async fn sort(
    state: &State<AppState>,
    session_id: String,
    dto: Json<SortDto>,
) -> Result<Json<ApiResponse<SessionView>>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let mut sessions = state.sessions.write().await;
    let session = session_mut(&mut sessions, id)?;

    session.set_sort_mode(dto.mode);
    Ok(Json(ApiResponse::success(session.view())))
}

/// Back to the home screen.
#[openapi(tag = "Browse")]
#[post("/browse/<session_id>/back")]
pub async fn back(
    state: &State<AppState>,
    session_id: String,
) -> Result<Json<ApiResponse<SessionView>>, ApiError> {
    let id = parse_session_id(&session_id)?;
    let mut sessions = state.sessions.write().await;
    let session = session_mut(&mut sessions, id)?;

    session.clear();
    Ok(Json(ApiResponse::success(session.view())))
}

#[openapi(tag = "Browse")]
#[delete("/browse/<session_id>")]
pub async fn close_session(
    state: &State<AppState>,
    session_id: String,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let id = parse_session_id(&session_id)?;
    state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    Ok(Json(ApiResponse::success_with_message(
        "Browse session closed".to_string(),
        session_id,
    )))
}
