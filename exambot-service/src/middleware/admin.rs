use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use service_core::error::AppError;

use crate::AppState;

/// Guard for admin-only routes.
///
/// A no-op unless `ADMIN_REQUIRE_TOKEN` is set; then a bearer token issued by
/// admin login is required and its claims are stored in the request
/// extensions.
pub async fn admin_token_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.config.admin.require_token {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|value| value.trim().to_string())
        .ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!("Missing or invalid Authorization header"))
        })?;

    let claims = state.admin.validate_token(&token)?;
    tracing::debug!(jti = %claims.jti, "Admin token accepted");
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
