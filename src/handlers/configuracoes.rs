// src/handlers/configuracoes.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::configuracao::{AtualizarConfiguracaoPayload, ConfiguracaoCatalogo},
};

// GET /api/configuracoes
#[utoipa::path(
    get,
    path = "/api/configuracoes",
    tag = "Configurações",
    responses(
        (status = 200, description = "Configurações atuais do catálogo (vazias antes do primeiro salvamento)", body = ConfiguracaoCatalogo)
    )
)]
pub async fn obter_configuracoes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let config = app_state
        .configuracao_service
        .obter(&app_state.db_pool)
        .await?;
    Ok((StatusCode::OK, Json(config)))
}

// PUT /api/configuracoes
#[utoipa::path(
    put,
    path = "/api/configuracoes",
    tag = "Configurações",
    request_body = AtualizarConfiguracaoPayload,
    responses(
        (status = 200, description = "Configurações salvas", body = ConfiguracaoCatalogo),
        (status = 400, description = "Cor primária fora do formato #RRGGBB")
    )
)]
pub async fn salvar_configuracoes(
    State(app_state): State<AppState>,
    Json(payload): Json<AtualizarConfiguracaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    let config = app_state
        .configuracao_service
        .salvar(&app_state.db_pool, payload)
        .await?;
    Ok((StatusCode::OK, Json(config)))
}
