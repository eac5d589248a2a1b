// src/models/cliente.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::pedido::ClienteResumo;

// Pessoa física (CPF) ou jurídica (CNPJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoCliente {
    Fisica,
    Juridica,
}

impl TipoCliente {
    // Quantidade de dígitos que o documento precisa ter.
    pub fn digitos_documento(&self) -> usize {
        match self {
            TipoCliente::Fisica => 11,
            TipoCliente::Juridica => 14,
        }
    }

    pub fn rotulo_documento(&self) -> &'static str {
        match self {
            TipoCliente::Fisica => "CPF",
            TipoCliente::Juridica => "CNPJ",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: Uuid,

    #[schema(example = "Mercado Bom Preço Ltda")]
    pub nome: String,

    // Somente dígitos; o tamanho é validado contra o tipo.
    #[schema(example = "12345678000199")]
    pub documento: String,

    pub tipo: TipoCliente,

    #[schema(example = "(11) 98888-7777")]
    pub telefone: Option<String>,

    #[schema(example = "compras@bompreco.com.br")]
    pub email: Option<String>,

    #[schema(example = "Av. das Nações, 1200 - Centro")]
    pub endereco: Option<String>,

    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl Cliente {
    // Cópia dos campos que um pedido congela na criação.
    pub fn resumo(&self) -> ClienteResumo {
        ClienteResumo {
            nome: self.nome.clone(),
            documento: self.documento.clone(),
            tipo: self.tipo,
        }
    }
}
