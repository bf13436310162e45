/*
 * Responsibility
 * - GET /api/v1/health (liveness, no auth)
 * - GET / banner
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

pub async fn home() -> &'static str {
    "booking-api is running"
}
