// src/handlers/pedidos.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::pedido::{ItemPedido, Pedido},
};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPedidoPayload {
    pub produto_id: Uuid,

    #[validate(length(min = 1, message = "O nome do item é obrigatório."))]
    #[schema(example = "Arroz Agulhinha Tipo 1")]
    pub nome: String,

    #[validate(length(min = 1, message = "O peso do item é obrigatório."))]
    #[schema(example = "5kg")]
    pub peso: String,

    #[validate(range(min = 1, message = "A quantidade deve ser pelo menos 1."))]
    #[schema(example = 10)]
    pub quantidade: u32,

    #[schema(example = 25.9)]
    pub preco_unitario: Decimal,

    #[schema(example = "Tio João")]
    pub marca: Option<String>,
}

// O total do item não é aceito de fora: vai zerado e o modelo recalcula.
impl From<ItemPedidoPayload> for ItemPedido {
    fn from(payload: ItemPedidoPayload) -> Self {
        ItemPedido {
            produto_id: payload.produto_id,
            nome: payload.nome,
            peso: payload.peso,
            quantidade: payload.quantidade,
            preco_unitario: payload.preco_unitario,
            preco_total: Decimal::ZERO,
            marca: payload.marca,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriarPedidoPayload {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub cliente_id: Option<Uuid>,

    // Venda de balcão, sem cadastro de cliente.
    #[serde(default)]
    #[schema(example = false)]
    pub sem_cliente: bool,

    #[validate(length(min = 1, message = "O pedido precisa de pelo menos um item."))]
    pub itens: Vec<ItemPedidoPayload>,

    #[schema(value_type = String, format = Date, example = "2025-04-30")]
    pub data_limite_pagamento: NaiveDate,

    #[schema(example = "Entregar no período da manhã.")]
    pub observacoes: Option<String>,
}

// Campos ausentes permanecem como estão; `removerCliente` desvincula o
// cliente atual sem apontar outro.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarPedidoPayload {
    pub cliente_id: Option<Uuid>,

    #[serde(default)]
    #[schema(example = false)]
    pub remover_cliente: bool,

    #[validate(length(min = 1, message = "O pedido precisa de pelo menos um item."))]
    pub itens: Option<Vec<ItemPedidoPayload>>,

    #[schema(value_type = Option<String>, format = Date, example = "2025-05-15")]
    pub data_limite_pagamento: Option<NaiveDate>,

    pub observacoes: Option<String>,
}

// POST /api/pedidos
#[utoipa::path(
    post,
    path = "/api/pedidos",
    tag = "Pedidos",
    request_body = CriarPedidoPayload,
    responses(
        (status = 201, description = "Pedido criado com número e totais atribuídos", body = Pedido),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente informado não existe")
    )
)]
pub async fn criar_pedido(
    State(app_state): State<AppState>,
    Json(payload): Json<CriarPedidoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    for item in &payload.itens {
        item.validate()?;
    }

    let pedido = app_state
        .pedido_service
        .criar(
            &app_state.db_pool,
            payload.cliente_id,
            payload.sem_cliente,
            payload.itens.into_iter().map(Into::into).collect(),
            payload.data_limite_pagamento,
            payload.observacoes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(pedido)))
}

// GET /api/pedidos
#[utoipa::path(
    get,
    path = "/api/pedidos",
    tag = "Pedidos",
    responses(
        (status = 200, description = "Todos os pedidos, do mais recente para o mais antigo", body = Vec<Pedido>)
    )
)]
pub async fn listar_pedidos(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let pedidos = app_state.pedido_service.listar(&app_state.db_pool).await?;
    Ok((StatusCode::OK, Json(pedidos)))
}

// GET /api/pedidos/{id}
#[utoipa::path(
    get,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido encontrado", body = Pedido),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn obter_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pedido = app_state
        .pedido_service
        .carregar(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(pedido)))
}

// PUT /api/pedidos/{id}
#[utoipa::path(
    put,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = AtualizarPedidoPayload,
    responses(
        (status = 200, description = "Pedido atualizado com totais recalculados", body = Pedido),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Pedido finalizado ou cancelado não aceita edição")
    )
)]
pub async fn atualizar_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarPedidoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    for item in payload.itens.iter().flatten() {
        item.validate()?;
    }

    let pedido = app_state
        .pedido_service
        .atualizar(
            &app_state.db_pool,
            id,
            payload.cliente_id,
            payload.remover_cliente,
            payload
                .itens
                .map(|itens| itens.into_iter().map(Into::into).collect()),
            payload.data_limite_pagamento,
            payload.observacoes,
        )
        .await?;

    Ok((StatusCode::OK, Json(pedido)))
}

// POST /api/pedidos/{id}/finalizar
#[utoipa::path(
    post,
    path = "/api/pedidos/{id}/finalizar",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido finalizado", body = Pedido),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Só pedidos em aberto podem ser finalizados")
    )
)]
pub async fn finalizar_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pedido = app_state
        .pedido_service
        .finalizar(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(pedido)))
}

// POST /api/pedidos/{id}/cancelar
#[utoipa::path(
    post,
    path = "/api/pedidos/{id}/cancelar",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido cancelado (vale também para finalizados)", body = Pedido),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Pedido já estava cancelado")
    )
)]
pub async fn cancelar_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pedido = app_state
        .pedido_service
        .cancelar(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(pedido)))
}

// DELETE /api/pedidos/{id}
#[utoipa::path(
    delete,
    path = "/api/pedidos/{id}",
    tag = "Pedidos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 204, description = "Pedido removido; o número não volta para a sequência"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn remover_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .pedido_service
        .deletar(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
