// src/services/configuracao_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ConfiguracaoRepository,
    models::configuracao::{AtualizarConfiguracaoPayload, ConfiguracaoCatalogo},
    services::pdf::paleta,
};

// Identidade visual do catálogo e dos documentos: linha única, lida inteira
// e regravada inteira.
#[derive(Clone)]
pub struct ConfiguracaoService {
    repo: ConfiguracaoRepository,
}

impl ConfiguracaoService {
    pub fn new(repo: ConfiguracaoRepository) -> Self {
        Self { repo }
    }

    pub async fn obter(&self, pool: &PgPool) -> Result<ConfiguracaoCatalogo, AppError> {
        self.repo.buscar(pool).await
    }

    pub async fn salvar(
        &self,
        pool: &PgPool,
        mut payload: AtualizarConfiguracaoPayload,
    ) -> Result<ConfiguracaoCatalogo, AppError> {
        payload.nome_empresa = limpar(payload.nome_empresa);
        payload.logo_url = limpar(payload.logo_url);
        payload.cor_primaria = limpar(payload.cor_primaria);
        payload.telefone = limpar(payload.telefone);
        payload.email = limpar(payload.email);
        payload.endereco = limpar(payload.endereco);
        payload.chave_pix = limpar(payload.chave_pix);
        payload.tipo_chave_pix = limpar(payload.tipo_chave_pix);

        // A cor entra na paleta de todos os documentos; melhor recusar agora
        // do que gerar PDFs com a cor padrão silenciosamente.
        if let Some(cor) = payload.cor_primaria.as_deref() {
            if paleta::interpretar_hex(cor).is_none() {
                return Err(AppError::Validacao(
                    "A cor primária deve estar no formato #RRGGBB.".to_string(),
                ));
            }
        }

        let config = self.repo.salvar(pool, &payload).await?;
        tracing::info!("✅ Configurações do catálogo salvas.");
        Ok(config)
    }
}

fn limpar(valor: Option<String>) -> Option<String> {
    valor
        .map(|texto| texto.trim().to_string())
        .filter(|texto| !texto.is_empty())
}
