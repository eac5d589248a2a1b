// src/models/pedido.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{common::error::AppError, models::cliente::TipoCliente};

// Situação do pedido no ciclo de vida. FINALIZADO e CANCELADO são terminais:
// nenhum deles volta para EM_ABERTO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_pedido", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusPedido {
    EmAberto,
    Finalizado,
    Cancelado,
}

impl StatusPedido {
    pub fn descricao(&self) -> &'static str {
        match self {
            StatusPedido::EmAberto => "EM ABERTO",
            StatusPedido::Finalizado => "FINALIZADO",
            StatusPedido::Cancelado => "CANCELADO",
        }
    }
}

// Retrato do cliente capturado na criação do pedido. É uma cópia proposital:
// alterações posteriores no cadastro não mudam pedidos já emitidos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClienteResumo {
    #[schema(example = "Mercado Bom Preço Ltda")]
    pub nome: String,

    #[schema(example = "12345678000199")]
    pub documento: String,

    pub tipo: TipoCliente,
}

// Item de venda com preço congelado no momento em que foi adicionado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPedido {
    pub produto_id: Uuid,

    #[schema(example = "Arroz Agulhinha Tipo 1")]
    pub nome: String,

    #[schema(example = "5kg")]
    pub peso: String,

    #[schema(example = 10)]
    pub quantidade: u32,

    pub preco_unitario: Decimal,

    // Sempre derivado de quantidade x preço unitário; nunca aceito de fora.
    pub preco_total: Decimal,

    #[schema(example = "Tio João")]
    pub marca: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: Uuid,

    #[schema(example = "PED-2025-001")]
    pub numero: String,

    pub cliente_id: Option<Uuid>,

    #[sqlx(json(nullable))]
    pub cliente: Option<ClienteResumo>,

    #[sqlx(json)]
    pub itens: Vec<ItemPedido>,

    pub valor_total: Decimal,

    pub status: StatusPedido,

    #[schema(example = "2025-04-30")]
    pub data_limite_pagamento: NaiveDate,

    pub observacoes: Option<String>,

    pub timestamp_criacao: DateTime<Utc>,
    pub timestamp_atualizacao: DateTime<Utc>,
}

// Dados já resolvidos para criar um pedido (cliente carregado, se houver).
#[derive(Debug)]
pub struct NovoPedido {
    pub cliente: Option<(Uuid, ClienteResumo)>,
    pub itens: Vec<ItemPedido>,
    pub data_limite_pagamento: NaiveDate,
    pub observacoes: Option<String>,
}

// Campos de um pedido aberto que podem ser trocados; os ausentes permanecem.
#[derive(Debug, Default)]
pub struct EdicaoPedido {
    pub cliente: Option<(Uuid, ClienteResumo)>,
    pub remover_cliente: bool,
    pub itens: Option<Vec<ItemPedido>>,
    pub data_limite_pagamento: Option<NaiveDate>,
    pub observacoes: Option<String>,
}

impl Pedido {
    // Monta um pedido recém-criado. Totais são recalculados aqui, nunca
    // confiados do chamador.
    pub fn novo(numero: String, dados: NovoPedido) -> Self {
        let agora = Utc::now();
        let (cliente_id, cliente) = match dados.cliente {
            Some((id, resumo)) => (Some(id), Some(resumo)),
            None => (None, None),
        };
        let mut pedido = Self {
            id: Uuid::new_v4(),
            numero,
            cliente_id,
            cliente,
            itens: dados.itens,
            valor_total: Decimal::ZERO,
            status: StatusPedido::EmAberto,
            data_limite_pagamento: dados.data_limite_pagamento,
            observacoes: normalizar_observacoes(dados.observacoes),
            timestamp_criacao: agora,
            timestamp_atualizacao: agora,
        };
        pedido.recalcular_total();
        pedido
    }

    // Invariante do modelo: precoTotal de cada item e o valorTotal derivam
    // sempre dos itens atuais.
    pub fn recalcular_total(&mut self) {
        let mut soma = Decimal::ZERO;
        for item in &mut self.itens {
            item.preco_total = item.preco_unitario * Decimal::from(item.quantidade);
            soma += item.preco_total;
        }
        self.valor_total = soma;
    }

    // Só pedidos EM_ABERTO aceitam edição; os demais são imutáveis
    // (exceto pela exclusão, que vale em qualquer estado).
    pub fn aplicar_edicao(&mut self, edicao: EdicaoPedido) -> Result<(), AppError> {
        if self.status != StatusPedido::EmAberto {
            return Err(AppError::EstadoInvalido(format!(
                "Pedido {} está {} e não pode ser editado.",
                self.numero,
                self.status.descricao()
            )));
        }

        if edicao.remover_cliente {
            self.cliente_id = None;
            self.cliente = None;
        } else if let Some((id, resumo)) = edicao.cliente {
            self.cliente_id = Some(id);
            self.cliente = Some(resumo);
        }
        if let Some(itens) = edicao.itens {
            self.itens = itens;
        }
        if let Some(data) = edicao.data_limite_pagamento {
            self.data_limite_pagamento = data;
        }
        if let Some(observacoes) = edicao.observacoes {
            self.observacoes = normalizar_observacoes(Some(observacoes));
        }

        self.recalcular_total();
        self.timestamp_atualizacao = Utc::now();
        Ok(())
    }

    pub fn finalizar(&mut self) -> Result<(), AppError> {
        if self.status != StatusPedido::EmAberto {
            return Err(AppError::EstadoInvalido(format!(
                "Pedido {} está {} e não pode ser finalizado.",
                self.numero,
                self.status.descricao()
            )));
        }
        self.status = StatusPedido::Finalizado;
        self.timestamp_atualizacao = Utc::now();
        Ok(())
    }

    // Cancelar vale para pedidos abertos e também para finalizados (estorno
    // pós-venda); apenas um pedido já cancelado é rejeitado.
    pub fn cancelar(&mut self) -> Result<(), AppError> {
        if self.status == StatusPedido::Cancelado {
            return Err(AppError::EstadoInvalido(format!(
                "Pedido {} já está cancelado.",
                self.numero
            )));
        }
        self.status = StatusPedido::Cancelado;
        self.timestamp_atualizacao = Utc::now();
        Ok(())
    }
}

fn normalizar_observacoes(observacoes: Option<String>) -> Option<String> {
    observacoes
        .map(|texto| texto.trim().to_string())
        .filter(|texto| !texto.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(nome: &str, quantidade: u32, preco_unitario: &str) -> ItemPedido {
        ItemPedido {
            produto_id: Uuid::new_v4(),
            nome: nome.to_string(),
            peso: "1kg".to_string(),
            quantidade,
            preco_unitario: preco_unitario.parse().unwrap(),
            preco_total: Decimal::ZERO,
            marca: None,
        }
    }

    fn pedido_de_teste() -> Pedido {
        Pedido::novo(
            "PED-2025-001".to_string(),
            NovoPedido {
                cliente: None,
                itens: vec![item("Arroz Agulhinha", 2, "10.00"), item("Feijão Carioca", 1, "5.00")],
                data_limite_pagamento: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
                observacoes: None,
            },
        )
    }

    #[test]
    fn criacao_recalcula_totais_e_abre_o_pedido() {
        let pedido = pedido_de_teste();

        assert_eq!(pedido.status, StatusPedido::EmAberto);
        assert_eq!(pedido.valor_total, "25.00".parse().unwrap());
        assert_eq!(pedido.itens[0].preco_total, "20.00".parse().unwrap());
        assert_eq!(pedido.itens[1].preco_total, "5.00".parse().unwrap());
    }

    #[test]
    fn valor_total_e_sempre_a_soma_dos_itens() {
        let pedido = pedido_de_teste();
        let soma: Decimal = pedido.itens.iter().map(|i| i.preco_total).sum();
        assert_eq!(pedido.valor_total, soma);
    }

    #[test]
    fn edicao_de_itens_recalcula_o_total() {
        let mut pedido = pedido_de_teste();

        pedido
            .aplicar_edicao(EdicaoPedido {
                itens: Some(vec![item("Açúcar Cristal", 3, "7.50")]),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(pedido.valor_total, "22.50".parse().unwrap());
    }

    #[test]
    fn editar_pedido_finalizado_falha() {
        let mut pedido = pedido_de_teste();
        pedido.finalizar().unwrap();

        let erro = pedido
            .aplicar_edicao(EdicaoPedido {
                observacoes: Some("entregar à tarde".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(erro, AppError::EstadoInvalido(_)));
    }

    #[test]
    fn editar_pedido_cancelado_falha() {
        let mut pedido = pedido_de_teste();
        pedido.cancelar().unwrap();

        let erro = pedido.aplicar_edicao(EdicaoPedido::default()).unwrap_err();
        assert!(matches!(erro, AppError::EstadoInvalido(_)));
    }

    #[test]
    fn finalizar_duas_vezes_falha() {
        let mut pedido = pedido_de_teste();
        pedido.finalizar().unwrap();

        assert!(matches!(pedido.finalizar(), Err(AppError::EstadoInvalido(_))));
    }

    #[test]
    fn finalizar_pedido_cancelado_falha() {
        let mut pedido = pedido_de_teste();
        pedido.cancelar().unwrap();

        assert!(matches!(pedido.finalizar(), Err(AppError::EstadoInvalido(_))));
    }

    #[test]
    fn cancelar_pedido_finalizado_e_permitido() {
        let mut pedido = pedido_de_teste();
        pedido.finalizar().unwrap();

        pedido.cancelar().unwrap();
        assert_eq!(pedido.status, StatusPedido::Cancelado);
    }

    #[test]
    fn cancelar_duas_vezes_falha() {
        let mut pedido = pedido_de_teste();
        pedido.cancelar().unwrap();

        assert!(matches!(pedido.cancelar(), Err(AppError::EstadoInvalido(_))));
    }

    #[test]
    fn fluxo_completo_de_venda() {
        let mut pedido = pedido_de_teste();
        assert_eq!(pedido.valor_total, "25.00".parse().unwrap());
        assert_eq!(pedido.status, StatusPedido::EmAberto);

        pedido.finalizar().unwrap();
        assert_eq!(pedido.status, StatusPedido::Finalizado);

        let erro = pedido
            .aplicar_edicao(EdicaoPedido {
                observacoes: Some("x".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(erro, AppError::EstadoInvalido(_)));
    }

    #[test]
    fn observacoes_em_branco_sao_descartadas() {
        let pedido = Pedido::novo(
            "PED-2025-002".to_string(),
            NovoPedido {
                cliente: None,
                itens: vec![item("Café Torrado", 1, "18.00")],
                data_limite_pagamento: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
                observacoes: Some("   ".to_string()),
            },
        );

        assert_eq!(pedido.observacoes, None);
    }

    #[test]
    fn edicao_troca_e_remove_cliente() {
        let mut pedido = pedido_de_teste();

        let resumo = ClienteResumo {
            nome: "Mercado Central".to_string(),
            documento: "12345678000199".to_string(),
            tipo: crate::models::cliente::TipoCliente::Juridica,
        };
        let cliente_id = Uuid::new_v4();

        pedido
            .aplicar_edicao(EdicaoPedido {
                cliente: Some((cliente_id, resumo.clone())),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(pedido.cliente_id, Some(cliente_id));
        assert_eq!(pedido.cliente, Some(resumo));

        pedido
            .aplicar_edicao(EdicaoPedido {
                remover_cliente: true,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(pedido.cliente_id, None);
        assert_eq!(pedido.cliente, None);
    }
}
