use axum::Json;
use serde_json::{json, Value};

use crate::dtos::MessageResponse;

/// Liveness message under the API prefix.
pub async fn api_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "ExamBot API is running".to_string(),
    })
}

/// Health check endpoint for container liveness probes.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "exambot-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
