// src/models/produto.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: Uuid,

    #[schema(example = "Arroz Agulhinha Tipo 1")]
    pub nome: String,

    // Peso/volume da unidade em texto livre ("5kg", "900ml", "12x1L").
    #[schema(example = "5kg")]
    pub peso: String,

    pub preco_unitario: Decimal,

    // Preço fechado do fardo, quando vendido em atacado.
    pub preco_fardo: Option<Decimal>,

    #[schema(example = 6)]
    pub qtd_fardo: Option<i32>,

    #[schema(example = "Tio João")]
    pub marca: Option<String>,

    #[schema(example = "/uploads/3f2d8a7e.jpg")]
    pub image_path: Option<String>,

    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Marca {
    pub id: Uuid,

    #[schema(example = "Tio João")]
    pub nome: String,

    pub criado_em: DateTime<Utc>,
}

// Filtros da listagem de produtos, reaproveitados na exportação do catálogo.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
pub struct FiltroProdutos {
    // Nome exato da marca.
    pub marca: Option<String>,

    // Trecho do nome do produto, sem diferenciar maiúsculas.
    pub busca: Option<String>,
}

impl FiltroProdutos {
    pub fn ativo(&self) -> bool {
        self.marca.as_deref().is_some_and(|marca| !marca.trim().is_empty())
            || self.busca.as_deref().is_some_and(|busca| !busca.trim().is_empty())
    }
}
