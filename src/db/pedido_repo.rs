// src/db/pedido_repo.rs

use sqlx::{types::Json, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::pedido::{Pedido, StatusPedido},
};

const COLUNAS_PEDIDO: &str =
    "id, numero, cliente_id, cliente, itens, valor_total, status, data_limite_pagamento, \
     observacoes, timestamp_criacao, timestamp_atualizacao";

#[derive(Clone)]
pub struct PedidoRepository {
    pool: PgPool,
}

impl PedidoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grava um pedido recém-criado. Cliente e itens entram como JSONB, de
    /// forma que o documento impresso não muda se o cadastro mudar depois.
    pub async fn inserir<'e, E>(&self, executor: E, pedido: &Pedido) -> Result<Pedido, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let inserido = sqlx::query_as::<_, Pedido>(&format!(
            r#"
            INSERT INTO pedidos (
                id, numero, cliente_id, cliente, itens, valor_total, status,
                data_limite_pagamento, observacoes, timestamp_criacao, timestamp_atualizacao
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUNAS_PEDIDO}
            "#,
        ))
        .bind(pedido.id)
        .bind(&pedido.numero)
        .bind(pedido.cliente_id)
        .bind(pedido.cliente.as_ref().map(Json))
        .bind(Json(&pedido.itens))
        .bind(pedido.valor_total)
        .bind(pedido.status)
        .bind(pedido.data_limite_pagamento)
        .bind(pedido.observacoes.as_deref())
        .bind(pedido.timestamp_criacao)
        .bind(pedido.timestamp_atualizacao)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Validacao(format!(
                        "O número '{}' já foi usado por outro pedido.",
                        pedido.numero
                    ));
                }
            }
            e.into()
        })?;

        Ok(inserido)
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Pedido>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pedidos = sqlx::query_as::<_, Pedido>(&format!(
            "SELECT {COLUNAS_PEDIDO} FROM pedidos ORDER BY timestamp_criacao DESC"
        ))
        .fetch_all(executor)
        .await?;

        Ok(pedidos)
    }

    pub async fn listar_por_status<'e, E>(
        &self,
        executor: E,
        status: StatusPedido,
    ) -> Result<Vec<Pedido>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pedidos = sqlx::query_as::<_, Pedido>(&format!(
            "SELECT {COLUNAS_PEDIDO} FROM pedidos WHERE status = $1 ORDER BY timestamp_criacao DESC"
        ))
        .bind(status)
        .fetch_all(executor)
        .await?;

        Ok(pedidos)
    }

    pub async fn buscar<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Pedido>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pedido = sqlx::query_as::<_, Pedido>(&format!(
            "SELECT {COLUNAS_PEDIDO} FROM pedidos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(pedido)
    }

    // Regrava a linha inteira a partir do modelo já validado em memória.
    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        pedido: &Pedido,
    ) -> Result<Option<Pedido>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let atualizado = sqlx::query_as::<_, Pedido>(&format!(
            r#"
            UPDATE pedidos
            SET cliente_id = $2, cliente = $3, itens = $4, valor_total = $5,
                status = $6, data_limite_pagamento = $7, observacoes = $8,
                timestamp_atualizacao = $9
            WHERE id = $1
            RETURNING {COLUNAS_PEDIDO}
            "#,
        ))
        .bind(pedido.id)
        .bind(pedido.cliente_id)
        .bind(pedido.cliente.as_ref().map(Json))
        .bind(Json(&pedido.itens))
        .bind(pedido.valor_total)
        .bind(pedido.status)
        .bind(pedido.data_limite_pagamento)
        .bind(pedido.observacoes.as_deref())
        .bind(pedido.timestamp_atualizacao)
        .fetch_optional(executor)
        .await?;

        Ok(atualizado)
    }

    pub async fn remover<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM pedidos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
