// src/handlers/pagamentos.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::pagamento::PagamentoPendente};

// GET /api/pagamentos/pendentes
#[utoipa::path(
    get,
    path = "/api/pagamentos/pendentes",
    tag = "Pagamentos",
    responses(
        (status = 200, description = "Pedidos em aberto com a situação de pagamento calculada para hoje, do mais atrasado para o mais folgado", body = Vec<PagamentoPendente>)
    )
)]
pub async fn listar_pagamentos_pendentes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pendentes = app_state
        .pagamento_service
        .listar_pendentes(&app_state.db_pool)
        .await?;
    Ok((StatusCode::OK, Json(pendentes)))
}
