// src/services/produto_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MarcaRepository, ProdutoRepository},
    models::produto::{FiltroProdutos, Marca, Produto},
};

#[derive(Clone)]
pub struct ProdutoService {
    repo: ProdutoRepository,
    marca_repo: MarcaRepository,
}

impl ProdutoService {
    pub fn new(repo: ProdutoRepository, marca_repo: MarcaRepository) -> Self {
        Self { repo, marca_repo }
    }

    // --- PRODUTOS ---

    #[allow(clippy::too_many_arguments)]
    pub async fn criar(
        &self,
        pool: &PgPool,
        nome: &str,
        peso: &str,
        preco_unitario: Decimal,
        preco_fardo: Option<Decimal>,
        qtd_fardo: Option<i32>,
        marca: Option<String>,
        image_path: Option<String>,
    ) -> Result<Produto, AppError> {
        validar_precos(preco_unitario, preco_fardo, qtd_fardo)?;

        let agora = Utc::now();
        let produto = Produto {
            id: Uuid::new_v4(),
            nome: nome.trim().to_string(),
            peso: peso.trim().to_string(),
            preco_unitario,
            preco_fardo,
            qtd_fardo,
            marca: normalizar_opcional(marca),
            image_path: normalizar_opcional(image_path),
            criado_em: agora,
            atualizado_em: agora,
        };
        let produto = self.repo.criar(pool, &produto).await?;

        tracing::info!("✅ Produto {} cadastrado.", produto.nome);
        Ok(produto)
    }

    pub async fn listar(
        &self,
        pool: &PgPool,
        filtro: &FiltroProdutos,
    ) -> Result<Vec<Produto>, AppError> {
        self.repo.listar(pool, filtro).await
    }

    pub async fn buscar(&self, pool: &PgPool, id: Uuid) -> Result<Produto, AppError> {
        self.repo
            .buscar(pool, id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Produto não encontrado.".to_string()))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn atualizar(
        &self,
        pool: &PgPool,
        id: Uuid,
        nome: &str,
        peso: &str,
        preco_unitario: Decimal,
        preco_fardo: Option<Decimal>,
        qtd_fardo: Option<i32>,
        marca: Option<String>,
        image_path: Option<String>,
    ) -> Result<Produto, AppError> {
        validar_precos(preco_unitario, preco_fardo, qtd_fardo)?;

        let mut produto = self.buscar(pool, id).await?;
        produto.nome = nome.trim().to_string();
        produto.peso = peso.trim().to_string();
        produto.preco_unitario = preco_unitario;
        produto.preco_fardo = preco_fardo;
        produto.qtd_fardo = qtd_fardo;
        produto.marca = normalizar_opcional(marca);
        produto.image_path = normalizar_opcional(image_path);

        self.repo
            .atualizar(pool, &produto)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Produto não encontrado.".to_string()))
    }

    pub async fn remover(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let removidos = self.repo.remover(pool, id).await?;
        if removidos == 0 {
            return Err(AppError::NaoEncontrado("Produto não encontrado.".to_string()));
        }
        Ok(())
    }

    // --- MARCAS ---

    pub async fn criar_marca(&self, pool: &PgPool, nome: &str) -> Result<Marca, AppError> {
        let nome = nome.trim();
        if nome.is_empty() {
            return Err(AppError::Validacao("Informe o nome da marca.".to_string()));
        }
        self.marca_repo.criar(pool, Uuid::new_v4(), nome).await
    }

    pub async fn listar_marcas(&self, pool: &PgPool) -> Result<Vec<Marca>, AppError> {
        self.marca_repo.listar(pool).await
    }

    pub async fn remover_marca(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        let removidos = self.marca_repo.remover(pool, id).await?;
        if removidos == 0 {
            return Err(AppError::NaoEncontrado("Marca não encontrada.".to_string()));
        }
        Ok(())
    }
}

// Os dois preços e a quantidade do fardo precisam ser positivos quando
// informados; o preço unitário é sempre obrigatório.
fn validar_precos(
    preco_unitario: Decimal,
    preco_fardo: Option<Decimal>,
    qtd_fardo: Option<i32>,
) -> Result<(), AppError> {
    if preco_unitario <= Decimal::ZERO {
        return Err(AppError::Validacao(
            "O preço unitário deve ser maior que zero.".to_string(),
        ));
    }
    if preco_fardo.is_some_and(|preco| preco <= Decimal::ZERO) {
        return Err(AppError::Validacao(
            "O preço do fardo deve ser maior que zero.".to_string(),
        ));
    }
    if qtd_fardo.is_some_and(|qtd| qtd <= 0) {
        return Err(AppError::Validacao(
            "A quantidade do fardo deve ser maior que zero.".to_string(),
        ));
    }
    Ok(())
}

fn normalizar_opcional(valor: Option<String>) -> Option<String> {
    valor
        .map(|texto| texto.trim().to_string())
        .filter(|texto| !texto.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preco_unitario_positivo_passa() {
        assert!(validar_precos(Decimal::new(100, 2), None, None).is_ok());
    }

    #[test]
    fn preco_unitario_zerado_falha() {
        let erro = validar_precos(Decimal::ZERO, None, None).unwrap_err();
        assert!(matches!(erro, AppError::Validacao(_)));
    }

    #[test]
    fn preco_de_fardo_negativo_falha() {
        let erro =
            validar_precos(Decimal::new(100, 2), Some(Decimal::new(-500, 2)), Some(6)).unwrap_err();
        assert!(matches!(erro, AppError::Validacao(_)));
    }

    #[test]
    fn quantidade_de_fardo_zerada_falha() {
        let erro =
            validar_precos(Decimal::new(100, 2), Some(Decimal::new(500, 2)), Some(0)).unwrap_err();
        assert!(matches!(erro, AppError::Validacao(_)));
    }

    #[test]
    fn marca_em_branco_vira_none() {
        assert_eq!(normalizar_opcional(Some("   ".to_string())), None);
        assert_eq!(
            normalizar_opcional(Some(" Tio João ".to_string())),
            Some("Tio João".to_string())
        );
    }
}
