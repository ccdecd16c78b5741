use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::repositories::TtsRepository;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(tts_repo): State<Arc<dyn TtsRepository>>) -> impl IntoResponse {
    if tts_repo.is_available().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "backend": tts_repo.name(),
                "format": tts_repo.format().as_str(),
                "tts": "available"
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "backend": tts_repo.name(),
                "format": tts_repo.format().as_str(),
                "tts": "unavailable"
            })),
        )
    }
}
