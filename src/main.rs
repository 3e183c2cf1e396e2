#[macro_use]
extern crate rocket;

mod config;
mod db;
mod guards;
mod models;
mod routes;
mod search;
mod services;
mod state;
mod store;
mod utils;

use dotenvy::dotenv;
use log::info;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Build, Request, Response, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};

/* ----------------------------- CORS ----------------------------- */

pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        if let Some(origin) = request.headers().get_one("Origin") {
            response.set_header(Header::new("Access-Control-Allow-Origin", origin));
        }

        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ));

        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        ));

        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

/* ----------------------------- OPTIONS ----------------------------- */

#[options("/<_..>")]
fn options_handler() {}

/* ----------------------------- ERRORS ----------------------------- */

#[catch(401)]
fn unauthorized() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "success": false,
        "message": "Admin login required"
    })
}

#[catch(403)]
fn forbidden() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "success": false,
        "message": "Admin access required"
    })
}

#[catch(404)]
fn not_found() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "success": false,
        "message": "Resource not found (check /api/v1 prefix)"
    })
}

#[catch(422)]
fn unprocessable() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "success": false,
        "message": "Malformed request body"
    })
}

#[catch(500)]
fn internal_error() -> rocket::serde::json::Value {
    rocket::serde::json::json!({
        "success": false,
        "message": "Internal server error"
    })
}

/* ----------------------------- SWAGGER ----------------------------- */

fn swagger_config() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/api/v1/openapi.json".to_string(),
        ..Default::default()
    }
}

/* ----------------------------- APP ----------------------------- */

/// Routes, fairings and catchers; application state is attached by the caller.
fn app() -> Rocket<Build> {
    rocket::build()
        .attach(CORS)
        .mount("/", routes![options_handler])
        .mount(
            "/api/v1",
            openapi_get_routes![
                // Auth
                routes::auth::admin_login,
                // Categories
                routes::category::get_all_categories,
                routes::category::get_category,
                routes::category::get_category_workers,
                // Workers
                routes::worker::get_all_workers,
                routes::worker::get_worker_by_id,
                routes::worker::get_featured_workers,
                routes::worker::search_workers,
                routes::worker::get_locations,
                routes::worker::suggest_locations,
                // Reviews
                routes::review::create_review,
                routes::review::get_worker_reviews,
                // Favorites
                routes::favorite::get_favorites,
                routes::favorite::toggle_favorite,
                // Bookings
                routes::booking::create_booking,
                routes::booking::get_bookings,
                routes::booking::cancel_booking,
                // Cart
                routes::cart::get_cart,
                routes::cart::add_to_cart,
                routes::cart::remove_from_cart,
                routes::cart::clear_cart,
                // Browse sessions
                routes::browse::open_session,
                routes::browse::get_session,
                routes::browse::report_location,
                routes::browse::select_category,
                routes::browse::search,
                routes::browse::refine,
                routes::browse::sort,
                routes::browse::back,
                routes::browse::close_session,
                // Admin Routes - Workers
                routes::admin::get_admin_workers,
                routes::admin::create_worker,
                routes::admin::update_worker,
                routes::admin::delete_worker,
                routes::admin::toggle_verified,
                routes::admin::toggle_featured,
                routes::admin::export_workers,
                routes::admin::get_dashboard,
                // Admin Routes - Offers
                routes::admin::get_offers,
                routes::admin::create_offer,
                routes::admin::delete_offer,
            ],
        )
        .mount("/api/docs", make_swagger_ui(&swagger_config()))
        .register("/", catchers![unauthorized, forbidden, not_found, unprocessable, internal_error])
}

/* ----------------------------- LAUNCH ----------------------------- */

#[launch]
fn rocket() -> Rocket<Build> {
    dotenv().ok();
    env_logger::init();

    info!("🚀 Marketplace API running");
    info!("📚 Swagger UI → http://localhost:8000/api/docs");

    app().attach(db::init())
}
