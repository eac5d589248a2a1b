// src/handlers/upload.rs

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState};

/// Teto de 10MB por arquivo; o front já barra em 5MB antes de enviar.
pub const LIMITE_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const EXTENSOES_ACEITAS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

// POST /api/upload-image
#[utoipa::path(
    post,
    path = "/api/upload-image",
    tag = "Upload",
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Imagem salva; retorna o caminho público em filePath"),
        (status = 400, description = "Campo ausente, tipo não aceito ou arquivo acima de 10MB")
    )
)]
pub async fn enviar_imagem(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(campo) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadInvalido(format!("Falha ao ler o formulário: {}", e)))?
    {
        if campo.name() != Some("productImage") {
            continue;
        }

        // 1. Só imagens passam; o tipo vem do próprio campo multipart.
        let tipo = campo.content_type().unwrap_or_default().to_string();
        if !tipo.starts_with("image/") {
            return Err(AppError::UploadInvalido(
                "Apenas arquivos de imagem são aceitos.".to_string(),
            ));
        }

        let nome_original = campo.file_name().unwrap_or_default().to_string();
        let dados = campo
            .bytes()
            .await
            .map_err(|e| AppError::UploadInvalido(format!("Falha ao receber o arquivo: {}", e)))?;

        // 2. Teto de tamanho do lado do servidor.
        if dados.len() > LIMITE_UPLOAD_BYTES {
            return Err(AppError::UploadInvalido(
                "A imagem pode ter no máximo 10MB.".to_string(),
            ));
        }

        // 3. Nome novo: UUID + extensão conhecida (qualquer outra vira jpg).
        let extensao = nome_original
            .rsplit('.')
            .next()
            .map(str::to_lowercase)
            .filter(|ext| EXTENSOES_ACEITAS.contains(&ext.as_str()))
            .unwrap_or_else(|| "jpg".to_string());
        let nome_arquivo = format!("{}.{}", Uuid::new_v4(), extensao);

        // 4. Grava em disco na pasta pública de uploads.
        tokio::fs::create_dir_all(&app_state.dir_uploads)
            .await
            .map_err(|e| anyhow::Error::new(e).context("Falha ao preparar a pasta de uploads"))?;
        let destino = app_state.dir_uploads.join(&nome_arquivo);
        tokio::fs::write(&destino, &dados)
            .await
            .map_err(|e| anyhow::Error::new(e).context("Falha ao gravar o arquivo enviado"))?;

        tracing::info!("✅ Imagem recebida: {} ({} bytes)", nome_arquivo, dados.len());
        return Ok((
            StatusCode::OK,
            Json(json!({ "filePath": format!("/uploads/{}", nome_arquivo) })),
        ));
    }

    Err(AppError::UploadInvalido(
        "Envie o arquivo no campo 'productImage'.".to_string(),
    ))
}
