// src/db/cliente_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cliente::{Cliente, TipoCliente},
};

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere um cliente novo. O documento é único em toda a base.
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome: &str,
        documento: &str,
        tipo: TipoCliente,
        telefone: Option<&str>,
        email: Option<&str>,
        endereco: Option<&str>,
    ) -> Result<Cliente, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            INSERT INTO clientes (id, nome, documento, tipo, telefone, email, endereco)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, nome, documento, tipo, telefone, email, endereco, criado_em, atualizado_em
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(documento)
        .bind(tipo)
        .bind(telefone)
        .bind(email)
        .bind(endereco)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Tratamento de erro de chave duplicada
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Validacao(format!(
                        "Já existe um cliente com o documento '{}'.",
                        documento
                    ));
                }
            }
            e.into()
        })?;

        Ok(cliente)
    }

    pub async fn listar<'e, E>(&self, executor: E) -> Result<Vec<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clientes = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT id, nome, documento, tipo, telefone, email, endereco, criado_em, atualizado_em
            FROM clientes
            ORDER BY nome ASC
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(clientes)
    }

    pub async fn buscar<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            SELECT id, nome, documento, tipo, telefone, email, endereco, criado_em, atualizado_em
            FROM clientes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(cliente)
    }

    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nome: &str,
        documento: &str,
        tipo: TipoCliente,
        telefone: Option<&str>,
        email: Option<&str>,
        endereco: Option<&str>,
    ) -> Result<Option<Cliente>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cliente = sqlx::query_as::<_, Cliente>(
            r#"
            UPDATE clientes
            SET nome = $2, documento = $3, tipo = $4, telefone = $5,
                email = $6, endereco = $7, atualizado_em = NOW()
            WHERE id = $1
            RETURNING id, nome, documento, tipo, telefone, email, endereco, criado_em, atualizado_em
            "#,
        )
        .bind(id)
        .bind(nome)
        .bind(documento)
        .bind(tipo)
        .bind(telefone)
        .bind(email)
        .bind(endereco)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Validacao(format!(
                        "Já existe um cliente com o documento '{}'.",
                        documento
                    ));
                }
            }
            e.into()
        })?;

        Ok(cliente)
    }

    // Pedidos antigos guardam o snapshot do cliente, então a remoção não
    // apaga histórico de venda (o vínculo vira NULL via FK).
    pub async fn remover<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
