use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;

use crate::models::{CartItem, WorkerId};
use crate::routes::validate_dto;
use crate::state::AppState;
use crate::store::AddToCart;
use crate::utils::{ApiError, ApiResponse};

#[derive(Debug, Serialize, JsonSchema)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: f64,
}

#[openapi(tag = "Cart")]
#[get("/cart")]
pub async fn get_cart(state: &State<AppState>) -> Json<ApiResponse<CartView>> {
    let store = state.store.read().await;
    Json(ApiResponse::success(CartView {
        items: store.cart().to_vec(),
        total: store.cart_total(),
    }))
}

/// A second item for the same worker is turned away with a notice, not an error.
#[openapi(tag = "Cart")]
#[post("/cart", data = "<item>")]
pub async fn add_to_cart(
    state: &State<AppState>,
    item: Json<CartItem>,
) -> Result<Json<ApiResponse<CartView>>, ApiError> {
    let item = item.into_inner();
    validate_dto(&item)?;

    let service_name = item.service_name.clone();
    let mut store = state.store.write().await;
    let message = match store.add_to_cart(item) {
        AddToCart::Added => format!("{} added to cart", service_name),
        AddToCart::AlreadyInCart => "Service already in cart".to_string(),
    };

    Ok(Json(ApiResponse::success_with_message(
        message,
        CartView {
            items: store.cart().to_vec(),
            total: store.cart_total(),
        },
    )))
}

#[openapi(tag = "Cart")]
#[delete("/cart/<worker_id>")]
pub async fn remove_from_cart(state: &State<AppState>, worker_id: WorkerId) -> Json<ApiResponse<CartView>> {
    let mut store = state.store.write().await;
    let message = if store.remove_from_cart(worker_id) {
        "Removed from cart"
    } else {
        "Item was not in the cart"
    };

    Json(ApiResponse::success_with_message(
        message.to_string(),
        CartView {
            items: store.cart().to_vec(),
            total: store.cart_total(),
        },
    ))
}

#[openapi(tag = "Cart")]
#[delete("/cart")]
pub async fn clear_cart(state: &State<AppState>) -> Json<ApiResponse<CartView>> {
    let mut store = state.store.write().await;
    store.clear_cart();
    Json(ApiResponse::success_with_message(
        "Cart cleared".to_string(),
        CartView { items: Vec::new(), total: 0.0 },
    ))
}
