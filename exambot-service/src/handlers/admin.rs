use axum::{extract::State, Extension, Json};
use service_core::{error::AppError, middleware::tracing::RequestId};

use crate::{
    dtos::{AdminLoginRequest, AdminLoginResponse},
    utils::ApiJson,
    AppState,
};

/// Check the admin credentials and issue a token on success.
///
/// Only the outcome and the request id are logged.
pub async fn admin_login(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiJson(req): ApiJson<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    match state.admin.login(&req) {
        Ok(response) => {
            tracing::info!(request_id = %request_id, success = true, "Admin login");
            Ok(Json(response))
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, success = false, "Admin login");
            Err(e)
        }
    }
}
