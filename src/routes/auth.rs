use log::{info, warn};
use rocket::serde::json::Json;
use rocket_okapi::openapi;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::services::JwtService;
use crate::utils::{ApiError, ApiResponse};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginDto {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Credentials are compared against configuration; logging out is the client
/// dropping the token.
#[openapi(tag = "Auth")]
#[post("/admin/login", data = "<dto>")]
pub async fn admin_login(dto: Json<LoginDto>) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if dto.username != Config::admin_username() || dto.password != Config::admin_password() {
        warn!("Failed admin login for '{}'", dto.username);
        return Err(ApiError::unauthorized("Invalid username or password."));
    }

    let token = JwtService::generate_admin_token(&dto.username)
        .map_err(|e| ApiError::internal_error(format!("Token generation failed: {}", e)))?;

    info!("Admin '{}' logged in", dto.username);

    Ok(Json(ApiResponse::success_with_message(
        "Login successful".to_string(),
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: Config::jwt_expiry(),
        },
    )))
}
