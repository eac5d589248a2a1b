// src/handlers/sistema.rs

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Sistema",
    responses(
        (status = 200, description = "Serviço no ar")
    )
)]
pub async fn verificar_saude() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
