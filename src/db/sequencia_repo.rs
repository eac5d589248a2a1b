// src/db/sequencia_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::common::error::AppError;

#[derive(Clone)]
pub struct SequenciaRepository {
    pool: PgPool,
}

impl SequenciaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Incrementa e devolve o contador do ano em um único comando, então dois
    /// pedidos criados ao mesmo tempo nunca recebem o mesmo valor.
    pub async fn incrementar<'e, E>(&self, executor: E, ano: i32) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let valor = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO sequencias (ano, valor)
            VALUES ($1, 1)
            ON CONFLICT (ano)
            DO UPDATE SET valor = sequencias.valor + 1
            RETURNING valor
            "#,
        )
        .bind(ano)
        .fetch_one(executor)
        .await?;

        Ok(valor)
    }
}
