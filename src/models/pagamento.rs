// src/models/pagamento.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::pedido::Pedido;

// Urgência de cobrança derivada da data-limite; calculada a cada leitura,
// nunca persistida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusPagamento {
    Vencido,
    VencendoHoje,
    NoPrazo,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagamentoPendente {
    pub pedido: Pedido,

    // Dias corridos desde o vencimento; zero para pedidos ainda no prazo.
    #[schema(example = 5)]
    pub dias_atraso: i64,

    pub status_pagamento: StatusPagamento,
}
