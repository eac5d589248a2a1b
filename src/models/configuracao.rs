// src/models/configuracao.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Identidade visual e dados de contato que os documentos gerados usam.
// Linha única no banco; ausência equivale a tudo vazio.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguracaoCatalogo {
    #[schema(example = "Distribuidora Premium")]
    pub nome_empresa: Option<String>,

    #[schema(example = "https://minhaloja.com.br/assets/logo.png")]
    pub logo_url: Option<String>,

    // Cor de destaque "#RRGGBB"; a paleta inteira dos documentos deriva dela.
    #[schema(example = "#2C3E50")]
    pub cor_primaria: Option<String>,

    #[schema(example = "(11) 99999-8888")]
    pub telefone: Option<String>,

    #[schema(example = "contato@distribuidora.com.br")]
    pub email: Option<String>,

    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub endereco: Option<String>,

    #[schema(example = "12345678000199")]
    pub chave_pix: Option<String>,

    #[schema(example = "CNPJ")]
    pub tipo_chave_pix: Option<String>,

    pub atualizado_em: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarConfiguracaoPayload {
    #[schema(example = "Distribuidora Premium")]
    pub nome_empresa: Option<String>,

    pub logo_url: Option<String>,

    #[schema(example = "#2C3E50")]
    pub cor_primaria: Option<String>,

    pub telefone: Option<String>,

    pub email: Option<String>,

    pub endereco: Option<String>,

    #[schema(example = "chave@pix.com.br")]
    pub chave_pix: Option<String>,

    #[schema(example = "EMAIL")]
    pub tipo_chave_pix: Option<String>,
}
