// src/handlers/clientes.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::cliente::{Cliente, TipoCliente},
};

// Mesmo corpo para criação e atualização: o cadastro é regravado inteiro.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Mercado Bom Preço Ltda")]
    pub nome: String,

    #[validate(length(min = 1, message = "O documento é obrigatório."))]
    #[schema(example = "12.345.678/0001-99")]
    pub documento: String,

    pub tipo: TipoCliente,

    #[schema(example = "(11) 98888-7777")]
    pub telefone: Option<String>,

    #[validate(email(message = "E-mail inválido."))]
    #[schema(example = "compras@bompreco.com.br")]
    pub email: Option<String>,

    #[schema(example = "Av. das Nações, 1200 - Centro")]
    pub endereco: Option<String>,
}

// POST /api/clientes
#[utoipa::path(
    post,
    path = "/api/clientes",
    tag = "Clientes",
    request_body = ClientePayload,
    responses(
        (status = 201, description = "Cliente criado", body = Cliente),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar_cliente(
    State(app_state): State<AppState>,
    Json(payload): Json<ClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .cliente_service
        .criar(
            &app_state.db_pool,
            &payload.nome,
            &payload.documento,
            payload.tipo,
            payload.telefone.as_deref(),
            payload.email.as_deref(),
            payload.endereco.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes
#[utoipa::path(
    get,
    path = "/api/clientes",
    tag = "Clientes",
    responses(
        (status = 200, description = "Lista de clientes em ordem alfabética", body = Vec<Cliente>)
    )
)]
pub async fn listar_clientes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state.cliente_service.listar(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(clientes)))
}

// GET /api/clientes/{id}
#[utoipa::path(
    get,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn obter_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state
        .cliente_service
        .buscar(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(cliente)))
}

// PUT /api/clientes/{id}
#[utoipa::path(
    put,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = ClientePayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Cliente),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn atualizar_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .cliente_service
        .atualizar(
            &app_state.db_pool,
            id,
            &payload.nome,
            &payload.documento,
            payload.tipo,
            payload.telefone.as_deref(),
            payload.email.as_deref(),
            payload.endereco.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(cliente)))
}

// DELETE /api/clientes/{id}
#[utoipa::path(
    delete,
    path = "/api/clientes/{id}",
    tag = "Clientes",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn remover_cliente(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .cliente_service
        .remover(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
