// src/handlers/produtos.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::produto::{FiltroProdutos, Marca, Produto},
};

// =============================================================================
//  ÁREA 1: PRODUTOS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Arroz Agulhinha Tipo 1")]
    pub nome: String,

    #[validate(length(min = 1, message = "O peso é obrigatório."))]
    #[schema(example = "5kg")]
    pub peso: String,

    #[schema(example = 25.9)]
    pub preco_unitario: Decimal,

    #[schema(example = 149.0)]
    pub preco_fardo: Option<Decimal>,

    #[schema(example = 6)]
    pub qtd_fardo: Option<i32>,

    #[schema(example = "Tio João")]
    pub marca: Option<String>,

    #[schema(example = "/uploads/3f2d8a7e.jpg")]
    pub image_path: Option<String>,
}

// POST /api/produtos
#[utoipa::path(
    post,
    path = "/api/produtos",
    tag = "Produtos",
    request_body = ProdutoPayload,
    responses(
        (status = 201, description = "Produto criado", body = Produto),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn criar_produto(
    State(app_state): State<AppState>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .produto_service
        .criar(
            &app_state.db_pool,
            &payload.nome,
            &payload.peso,
            payload.preco_unitario,
            payload.preco_fardo,
            payload.qtd_fardo,
            payload.marca,
            payload.image_path,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(produto)))
}

// GET /api/produtos
#[utoipa::path(
    get,
    path = "/api/produtos",
    tag = "Produtos",
    params(FiltroProdutos),
    responses(
        (status = 200, description = "Lista de produtos em ordem alfabética", body = Vec<Produto>)
    )
)]
pub async fn listar_produtos(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroProdutos>,
) -> Result<impl IntoResponse, AppError> {
    let produtos = app_state
        .produto_service
        .listar(&app_state.db_pool, &filtro)
        .await?;
    Ok((StatusCode::OK, Json(produtos)))
}

// GET /api/produtos/{id}
#[utoipa::path(
    get,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto encontrado", body = Produto),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn obter_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let produto = app_state
        .produto_service
        .buscar(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(produto)))
}

// PUT /api/produtos/{id}
#[utoipa::path(
    put,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = ProdutoPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Produto),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn atualizar_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProdutoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let produto = app_state
        .produto_service
        .atualizar(
            &app_state.db_pool,
            id,
            &payload.nome,
            &payload.peso,
            payload.preco_unitario,
            payload.preco_fardo,
            payload.qtd_fardo,
            payload.marca,
            payload.image_path,
        )
        .await?;

    Ok((StatusCode::OK, Json(produto)))
}

// DELETE /api/produtos/{id}
#[utoipa::path(
    delete,
    path = "/api/produtos/{id}",
    tag = "Produtos",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn remover_produto(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .produto_service
        .remover(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: MARCAS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarcaPayload {
    #[validate(length(min = 1, message = "O nome da marca é obrigatório."))]
    #[schema(example = "Tio João")]
    pub nome: String,
}

// POST /api/marcas
#[utoipa::path(
    post,
    path = "/api/marcas",
    tag = "Marcas",
    request_body = MarcaPayload,
    responses(
        (status = 201, description = "Marca criada", body = Marca),
        (status = 400, description = "Marca duplicada ou nome vazio")
    )
)]
pub async fn criar_marca(
    State(app_state): State<AppState>,
    Json(payload): Json<MarcaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let marca = app_state
        .produto_service
        .criar_marca(&app_state.db_pool, &payload.nome)
        .await?;

    Ok((StatusCode::CREATED, Json(marca)))
}

// GET /api/marcas
#[utoipa::path(
    get,
    path = "/api/marcas",
    tag = "Marcas",
    responses(
        (status = 200, description = "Lista de marcas em ordem alfabética", body = Vec<Marca>)
    )
)]
pub async fn listar_marcas(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let marcas = app_state
        .produto_service
        .listar_marcas(&app_state.db_pool)
        .await?;
    Ok((StatusCode::OK, Json(marcas)))
}

// DELETE /api/marcas/{id}
#[utoipa::path(
    delete,
    path = "/api/marcas/{id}",
    tag = "Marcas",
    params(("id" = Uuid, Path, description = "ID da marca")),
    responses(
        (status = 204, description = "Marca removida"),
        (status = 404, description = "Marca não encontrada")
    )
)]
pub async fn remover_marca(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .produto_service
        .remover_marca(&app_state.db_pool, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
