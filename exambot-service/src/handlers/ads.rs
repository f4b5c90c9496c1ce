use axum::{extract::State, Extension, Json};
use service_core::error::AppError;

use crate::{
    dtos::AdsUpdateResponse,
    models::AdsConfiguration,
    services::AdminClaims,
    utils::ApiJson,
    AppState,
};

pub async fn get_ads(State(state): State<AppState>) -> Result<Json<AdsConfiguration>, AppError> {
    Ok(Json(state.ads.load().await?))
}

/// Replace the ad layout. Succeeds whether or not the store persists;
/// `persisted` tells the caller which happened.
pub async fn update_ads(
    State(state): State<AppState>,
    claims: Option<Extension<AdminClaims>>,
    ApiJson(ads): ApiJson<AdsConfiguration>,
) -> Result<Json<AdsUpdateResponse>, AppError> {
    // Claims are only present when the admin token guard is enforced.
    let admin = claims.as_ref().map_or("anonymous", |Extension(c)| c.sub.as_str());
    tracing::info!(admin, filled_slots = ads.filled_slots(), "Ads update received");

    let persisted = state.ads.save(&ads).await?;

    let message = if persisted {
        "Ads updated successfully"
    } else {
        "Received ads update (not saved)"
    };

    Ok(Json(AdsUpdateResponse {
        success: true,
        message: message.to_string(),
        persisted,
    }))
}
