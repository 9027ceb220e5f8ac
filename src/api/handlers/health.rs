/*
 * Responsibility
 * - GET / (frontend 向けの疎通確認文字列)
 * - GET /health (疎通用 / gate を通さない)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn root() -> &'static str {
    "Your food is preparing...."
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
