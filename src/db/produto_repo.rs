// src/db/produto_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::produto::{FiltroProdutos, Produto},
};

const COLUNAS_PRODUTO: &str =
    "id, nome, peso, preco_unitario, preco_fardo, qtd_fardo, marca, image_path, criado_em, atualizado_em";

#[derive(Clone)]
pub struct ProdutoRepository {
    pool: PgPool,
}

impl ProdutoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn criar<'e, E>(
        &self,
        executor: E,
        produto: &Produto,
    ) -> Result<Produto, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let criado = sqlx::query_as::<_, Produto>(&format!(
            r#"
            INSERT INTO produtos (id, nome, peso, preco_unitario, preco_fardo, qtd_fardo, marca, image_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUNAS_PRODUTO}
            "#,
        ))
        .bind(produto.id)
        .bind(&produto.nome)
        .bind(&produto.peso)
        .bind(produto.preco_unitario)
        .bind(produto.preco_fardo)
        .bind(produto.qtd_fardo)
        .bind(produto.marca.as_deref())
        .bind(produto.image_path.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(criado)
    }

    /// Lista com filtros opcionais: marca exata e busca parcial por nome.
    pub async fn listar<'e, E>(
        &self,
        executor: E,
        filtro: &FiltroProdutos,
    ) -> Result<Vec<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let marca = filtro
            .marca
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_owned);
        let busca = filtro
            .busca
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(|b| format!("%{}%", b));

        let produtos = sqlx::query_as::<_, Produto>(&format!(
            r#"
            SELECT {COLUNAS_PRODUTO}
            FROM produtos
            WHERE ($1::text IS NULL OR marca = $1)
              AND ($2::text IS NULL OR nome ILIKE $2)
            ORDER BY nome ASC
            "#,
        ))
        .bind(marca)
        .bind(busca)
        .fetch_all(executor)
        .await?;

        Ok(produtos)
    }

    pub async fn buscar<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let produto = sqlx::query_as::<_, Produto>(&format!(
            "SELECT {COLUNAS_PRODUTO} FROM produtos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(produto)
    }

    pub async fn atualizar<'e, E>(
        &self,
        executor: E,
        produto: &Produto,
    ) -> Result<Option<Produto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let atualizado = sqlx::query_as::<_, Produto>(&format!(
            r#"
            UPDATE produtos
            SET nome = $2, peso = $3, preco_unitario = $4, preco_fardo = $5,
                qtd_fardo = $6, marca = $7, image_path = $8, atualizado_em = NOW()
            WHERE id = $1
            RETURNING {COLUNAS_PRODUTO}
            "#,
        ))
        .bind(produto.id)
        .bind(&produto.nome)
        .bind(&produto.peso)
        .bind(produto.preco_unitario)
        .bind(produto.preco_fardo)
        .bind(produto.qtd_fardo)
        .bind(produto.marca.as_deref())
        .bind(produto.image_path.as_deref())
        .fetch_optional(executor)
        .await?;

        Ok(atualizado)
    }

    pub async fn remover<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM produtos WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
