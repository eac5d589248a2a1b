use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Entidade referenciada não existe (pedido, cliente, produto...).
    #[error("{0}")]
    NaoEncontrado(String),

    // Operação ilegal para o estado atual do pedido.
    #[error("{0}")]
    EstadoInvalido(String),

    // Entrada malformada ou duplicada detectada fora do `validator`.
    #[error("{0}")]
    Validacao(String),

    // Arquivo recusado no upload (tipo ou tamanho).
    #[error("{0}")]
    UploadInvalido(String),

    // A montagem de um documento falhou por algo além de uma imagem ausente.
    #[error("Falha na geração do documento: {0}")]
    ErroRenderizacao(String),

    // Variante para erros de banco de dados (exemplo com sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NaoEncontrado(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::EstadoInvalido(msg) => (StatusCode::CONFLICT, msg),
            AppError::Validacao(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UploadInvalido(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ErroRenderizacao(ref detalhe) => {
                tracing::error!("Falha na geração do documento: {}", detalhe);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Não foi possível gerar o documento.".to_string(),
                )
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `#[from]` cuidou da conversão, agora só precisamos tratar o que fazer com eles.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
