// src/services/pagamento_service.rs

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::PedidoRepository,
    models::{
        pagamento::{PagamentoPendente, StatusPagamento},
        pedido::{Pedido, StatusPedido},
    },
};

// Situação de pagamento dos pedidos em aberto. Nada é persistido: os dias de
// atraso são recalculados contra a data de hoje a cada consulta.
#[derive(Clone)]
pub struct PagamentoService {
    pedido_repo: PedidoRepository,
}

impl PagamentoService {
    pub fn new(pedido_repo: PedidoRepository) -> Self {
        Self { pedido_repo }
    }

    /// Pedidos EM_ABERTO com a situação de pagamento avaliada para hoje,
    /// do mais atrasado para o de vencimento mais distante.
    pub async fn listar_pendentes(
        &self,
        pool: &PgPool,
    ) -> Result<Vec<PagamentoPendente>, AppError> {
        let pedidos = self
            .pedido_repo
            .listar_por_status(pool, StatusPedido::EmAberto)
            .await?;
        Ok(montar_pendentes(pedidos, Utc::now().date_naive()))
    }
}

/// Dias desde o vencimento e o status correspondente. O atraso informado
/// nunca fica negativo: antes do vencimento ele vale zero.
pub fn avaliar_pagamento(data_limite: NaiveDate, hoje: NaiveDate) -> (i64, StatusPagamento) {
    let dias = (hoje - data_limite).num_days();
    let status = if dias > 0 {
        StatusPagamento::Vencido
    } else if dias == 0 {
        StatusPagamento::VencendoHoje
    } else {
        StatusPagamento::NoPrazo
    };
    (dias.max(0), status)
}

// A ordenação usa os dias com sinal para que, entre pedidos ainda no prazo,
// o de vencimento mais próximo apareça primeiro.
pub fn montar_pendentes(pedidos: Vec<Pedido>, hoje: NaiveDate) -> Vec<PagamentoPendente> {
    let mut pendentes: Vec<(i64, PagamentoPendente)> = pedidos
        .into_iter()
        .map(|pedido| {
            let dias_corridos = (hoje - pedido.data_limite_pagamento).num_days();
            let (dias_atraso, status_pagamento) =
                avaliar_pagamento(pedido.data_limite_pagamento, hoje);
            (
                dias_corridos,
                PagamentoPendente {
                    pedido,
                    dias_atraso,
                    status_pagamento,
                },
            )
        })
        .collect();

    pendentes.sort_by(|a, b| b.0.cmp(&a.0));
    pendentes.into_iter().map(|(_, pendente)| pendente).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pedido::{ItemPedido, NovoPedido};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn dia(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    fn pedido(numero: &str, data_limite: NaiveDate) -> Pedido {
        Pedido::novo(
            numero.to_string(),
            NovoPedido {
                cliente: None,
                itens: vec![ItemPedido {
                    produto_id: Uuid::new_v4(),
                    nome: "Arroz Agulhinha".to_string(),
                    peso: "5kg".to_string(),
                    quantidade: 1,
                    preco_unitario: Decimal::new(1000, 2),
                    preco_total: Decimal::ZERO,
                    marca: None,
                }],
                data_limite_pagamento: data_limite,
                observacoes: None,
            },
        )
    }

    #[test]
    fn vencimento_passado_conta_o_atraso() {
        let (dias, status) = avaliar_pagamento(dia(2025, 6, 1), dia(2025, 6, 10));

        assert_eq!(dias, 9);
        assert_eq!(status, StatusPagamento::Vencido);
    }

    #[test]
    fn vencimento_no_dia_corrente_nao_e_atraso() {
        let (dias, status) = avaliar_pagamento(dia(2025, 6, 10), dia(2025, 6, 10));

        assert_eq!(dias, 0);
        assert_eq!(status, StatusPagamento::VencendoHoje);
    }

    #[test]
    fn vencimento_futuro_fica_no_prazo_com_atraso_zero() {
        let (dias, status) = avaliar_pagamento(dia(2025, 6, 15), dia(2025, 6, 10));

        assert_eq!(dias, 0);
        assert_eq!(status, StatusPagamento::NoPrazo);
    }

    #[test]
    fn pendentes_vem_do_mais_atrasado_para_o_mais_folgado() {
        let hoje = dia(2025, 6, 10);
        let pedidos = vec![
            pedido("PED-2025-001", dia(2025, 6, 20)),
            pedido("PED-2025-002", dia(2025, 6, 1)),
            pedido("PED-2025-003", dia(2025, 6, 10)),
            pedido("PED-2025-004", dia(2025, 6, 12)),
        ];

        let pendentes = montar_pendentes(pedidos, hoje);
        let numeros: Vec<&str> = pendentes
            .iter()
            .map(|p| p.pedido.numero.as_str())
            .collect();

        assert_eq!(
            numeros,
            vec!["PED-2025-002", "PED-2025-003", "PED-2025-004", "PED-2025-001"]
        );
        assert_eq!(pendentes[0].dias_atraso, 9);
        assert_eq!(pendentes[0].status_pagamento, StatusPagamento::Vencido);
        assert_eq!(pendentes[1].status_pagamento, StatusPagamento::VencendoHoje);
        assert_eq!(pendentes[3].dias_atraso, 0);
        assert_eq!(pendentes[3].status_pagamento, StatusPagamento::NoPrazo);
    }
}
