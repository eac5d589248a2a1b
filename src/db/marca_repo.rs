// src/db/marca_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::produto::Marca};

#[derive(Clone)]
pub struct MarcaRepository {
    pool: PgPool,
}

impl MarcaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar<'e, E>(&self, executor: E, id: Uuid, nome: &str) -> Result<Marca, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let marca = sqlx::query_as::<_, Marca>(
            r#"
            INSERT INTO marcas (id, nome)
            VALUES ($1, $2)
            RETURNING id, nome, criado_em
            "#,
        )
        .bind(id)
        .bind(nome)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Validacao(format!("A marca '{}' já existe.", nome));
                }
            }
            e.into()
        })?;

        Ok(marca)
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Marca>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let marcas =
            sqlx::query_as::<_, Marca>("SELECT id, nome, criado_em FROM marcas ORDER BY nome ASC")
                .fetch_all(executor)
                .await?;

        Ok(marcas)
    }

    pub async fn remover<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM marcas WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
