use chrono::Utc;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::models::{Booking, CreateBookingDto, NewBooking};
use crate::routes::validate_dto;
use crate::state::AppState;
use crate::utils::{ApiError, ApiResponse};

#[openapi(tag = "Booking")]
#[post("/bookings", data = "<dto>")]
pub async fn create_booking(
    state: &State<AppState>,
    dto: Json<CreateBookingDto>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let dto = dto.into_inner();
    validate_dto(&dto)?;

    let mut store = state.store.write().await;
    let worker_name = store
        .get_worker(dto.worker_id)
        .map(|w| w.name.clone())
        .ok_or_else(|| ApiError::not_found("Worker not found"))?;

    let booking = store.add_booking(NewBooking {
        worker_id: dto.worker_id,
        worker_name: worker_name.clone(),
        service: dto.service.trim().to_string(),
        date: dto.date.unwrap_or_else(Utc::now),
        customer_name: dto.customer_name.trim().to_string(),
    });

    Ok(Json(ApiResponse::success_with_message(
        format!("Booking request sent to {}! They will contact you shortly.", worker_name),
        booking,
    )))
}

#[openapi(tag = "Booking")]
#[get("/bookings")]
pub async fn get_bookings(state: &State<AppState>) -> Json<ApiResponse<Vec<Booking>>> {
    let store = state.store.read().await;
    Json(ApiResponse::success(store.bookings().to_vec()))
}

/// Unknown ids are a no-op; finished bookings come back unchanged.
#[openapi(tag = "Booking")]
#[post("/bookings/<booking_id>/cancel")]
pub async fn cancel_booking(state: &State<AppState>, booking_id: i64) -> Json<ApiResponse<Booking>> {
    let mut store = state.store.write().await;
    let was_terminal = match store.bookings().iter().find(|b| b.id == booking_id) {
        Some(existing) => existing.status.is_terminal(),
        None => return Json(ApiResponse::info("No such booking")),
    };

    match store.cancel_booking(booking_id) {
        Some(booking) if was_terminal => Json(ApiResponse::success_with_message(
            format!("Booking is already {}; nothing changed", booking.status.as_str()),
            booking,
        )),
        Some(booking) => Json(ApiResponse::success_with_message("Booking cancelled".to_string(), booking)),
        None => Json(ApiResponse::info("No such booking")),
    }
}
