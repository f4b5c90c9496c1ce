//! ExamBot API
//!
//! A thin HTTP backend with three unrelated capabilities:
//!
//! - `POST /api/generate/summary` and `POST /api/generate/questions` forward
//!   uploaded study-material images to a multimodal model.
//! - `POST /api/admin/login` checks the admin credential pair.
//! - `GET /api/ads` and `POST /api/ads/update` read and write the ad layout
//!   kept in a JSON file.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use service_core::error::ErrorResponse;
use service_core::middleware::{
    cors::cors_layer, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ExamBotConfig;
use crate::services::{AdStore, AdminService, VisionProvider};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ExamBotConfig>,
    pub provider: Arc<dyn VisionProvider>,
    pub admin: AdminService,
    pub ads: AdStore,
}

impl AppState {
    pub fn new(config: ExamBotConfig, provider: Arc<dyn VisionProvider>) -> Self {
        let admin = AdminService::new(&config.admin);
        let ads = AdStore::new(config.ads.file.clone(), config.ads.persist);

        Self {
            config: Arc::new(config),
            provider,
            admin,
            ads,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/ads/update", post(handlers::update_ads))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::admin_token_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api", get(handlers::api_root))
        .route("/api/", get(handlers::api_root))
        .route("/api/generate/summary", post(handlers::generate_summary))
        .route("/api/generate/questions", post(handlers::generate_questions))
        .route("/api/admin/login", post(handlers::admin_login))
        .route("/api/ads", get(handlers::get_ads))
        .merge(admin_routes)
        .fallback(not_found)
        .with_state(state.clone())
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&state.config.cors.allowed_origins))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            detail: "Not Found".to_string(),
        }),
    )
}
