use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::response::ApiResponse;
use crate::{ApiError, ADMIN_PASSWORD};

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub password: String,
}

/// Admin login, a plaintext compare against the shared password
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Password accepted"),
        (status = 401, description = "Password rejected")
    )
)]
pub async fn login(Json(body): Json<LoginRequest>) -> ApiResponse<Json<Value>> {
    let Some(expected) = ADMIN_PASSWORD.get() else {
        return Err(ApiError::ServerError(
            "admin password is not configured".to_string(),
        ));
    };

    if &body.password != expected {
        return Err(ApiError::AuthError("invalid password".to_string()));
    }

    Ok(Json(json!({ "success": true })))
}
