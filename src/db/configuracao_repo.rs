// src/db/configuracao_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::configuracao::{AtualizarConfiguracaoPayload, ConfiguracaoCatalogo},
};

const COLUNAS_CONFIGURACAO: &str =
    "nome_empresa, logo_url, cor_primaria, telefone, email, endereco, chave_pix, tipo_chave_pix, atualizado_em";

#[derive(Clone)]
pub struct ConfiguracaoRepository {
    pool: PgPool,
}

impl ConfiguracaoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar<'e, E>(&self, executor: E) -> Result<ConfiguracaoCatalogo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Antes da primeira gravação a tabela está vazia; nesse caso os
        // documentos saem com os textos padrão.
        let configuracao = sqlx::query_as::<_, ConfiguracaoCatalogo>(&format!(
            "SELECT {COLUNAS_CONFIGURACAO} FROM configuracao_catalogo WHERE id = 1"
        ))
        .fetch_optional(executor)
        .await?;

        Ok(configuracao.unwrap_or_default())
    }

    pub async fn salvar<'e, E>(
        &self,
        executor: E,
        input: &AtualizarConfiguracaoPayload,
    ) -> Result<ConfiguracaoCatalogo, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // UPSERT (Insert or Update) da linha única
        let configuracao = sqlx::query_as::<_, ConfiguracaoCatalogo>(&format!(
            r#"
            INSERT INTO configuracao_catalogo (
                id, nome_empresa, logo_url, cor_primaria, telefone,
                email, endereco, chave_pix, tipo_chave_pix
            )
            VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id)
            DO UPDATE SET
                nome_empresa = EXCLUDED.nome_empresa,
                logo_url = EXCLUDED.logo_url,
                cor_primaria = EXCLUDED.cor_primaria,
                telefone = EXCLUDED.telefone,
                email = EXCLUDED.email,
                endereco = EXCLUDED.endereco,
                chave_pix = EXCLUDED.chave_pix,
                tipo_chave_pix = EXCLUDED.tipo_chave_pix,
                atualizado_em = NOW()
            RETURNING {COLUNAS_CONFIGURACAO}
            "#,
        ))
        .bind(input.nome_empresa.as_deref())
        .bind(input.logo_url.as_deref())
        .bind(input.cor_primaria.as_deref())
        .bind(input.telefone.as_deref())
        .bind(input.email.as_deref())
        .bind(input.endereco.as_deref())
        .bind(input.chave_pix.as_deref())
        .bind(input.tipo_chave_pix.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(configuracao)
    }
}
