// src/handlers/documentos.rs

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, models::produto::FiltroProdutos,
    services::pdf::DocumentoGerado,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ParametrosCupom {
    // Largura da bobina em milímetros: 58 ou 80.
    #[serde(default = "largura_padrao")]
    pub largura: u32,
}

fn largura_padrao() -> u32 {
    80
}

// GET /api/pedidos/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/pedidos/{id}/pdf",
    tag = "Documentos",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "PDF A4 do pedido", content_type = "application/pdf"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn baixar_pdf_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let documento = app_state
        .documento_service
        .gerar_pdf_pedido(&app_state.db_pool, id)
        .await?;
    Ok(resposta_pdf(documento))
}

// GET /api/pedidos/{id}/cupom
#[utoipa::path(
    get,
    path = "/api/pedidos/{id}/cupom",
    tag = "Documentos",
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ParametrosCupom
    ),
    responses(
        (status = 200, description = "Cupom para bobina térmica", content_type = "application/pdf"),
        (status = 400, description = "Largura diferente de 58 e 80"),
        (status = 404, description = "Pedido não encontrado")
    )
)]
pub async fn baixar_cupom_pedido(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(parametros): Query<ParametrosCupom>,
) -> Result<Response, AppError> {
    let documento = app_state
        .documento_service
        .gerar_cupom(&app_state.db_pool, id, parametros.largura)
        .await?;
    Ok(resposta_pdf(documento))
}

// GET /api/catalogo/pdf
#[utoipa::path(
    get,
    path = "/api/catalogo/pdf",
    tag = "Documentos",
    params(FiltroProdutos),
    responses(
        (status = 200, description = "Catálogo de produtos, filtrado ou completo", content_type = "application/pdf")
    )
)]
pub async fn baixar_catalogo(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroProdutos>,
) -> Result<Response, AppError> {
    let documento = app_state
        .documento_service
        .gerar_catalogo(&app_state.db_pool, &filtro)
        .await?;
    Ok(resposta_pdf(documento))
}

// Configura os headers para o navegador baixar o PDF com o nome certo
fn resposta_pdf(documento: DocumentoGerado) -> Response {
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", documento.nome_arquivo),
        ),
    ];
    (headers, documento.bytes).into_response()
}
