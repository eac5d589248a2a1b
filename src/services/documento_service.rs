// src/services/documento_service.rs

use chrono::Utc;
use image::RgbImage;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ConfiguracaoRepository, PedidoRepository, ProdutoRepository},
    models::produto::FiltroProdutos,
    services::pdf::{
        catalogo::{self, ProdutoCatalogo},
        cupom,
        imagem::{BuscadorImagens, ImagemTile},
        pedido_a4, DocumentoGerado,
    },
};

/// Larguras de bobina aceitas para o cupom, em milímetros.
pub const LARGURAS_CUPOM: [u32; 2] = [58, 80];

// Monta os PDFs a partir do estado atual do banco. A busca de imagens fica
// toda aqui: os renderizadores recebem tudo resolvido e rodam síncronos.
#[derive(Clone)]
pub struct DocumentoService {
    pedido_repo: PedidoRepository,
    produto_repo: ProdutoRepository,
    configuracao_repo: ConfiguracaoRepository,
    imagens: BuscadorImagens,
}

impl DocumentoService {
    pub fn new(
        pedido_repo: PedidoRepository,
        produto_repo: ProdutoRepository,
        configuracao_repo: ConfiguracaoRepository,
        imagens: BuscadorImagens,
    ) -> Self {
        Self {
            pedido_repo,
            produto_repo,
            configuracao_repo,
            imagens,
        }
    }

    pub async fn gerar_pdf_pedido(
        &self,
        pool: &PgPool,
        id: Uuid,
    ) -> Result<DocumentoGerado, AppError> {
        // 1. Pedido e identidade visual.
        let pedido = self
            .pedido_repo
            .buscar(pool, id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Pedido não encontrado.".to_string()))?;
        let config = self.configuracao_repo.buscar(pool).await?;

        // 2. O logo segue a mesma regra das fotos: se não vier, o cabeçalho
        //    sai sem ele.
        let logo = self.buscar_logo(&config.logo_url).await;

        // 3. Renderiza.
        pedido_a4::renderizar(&pedido, &config, logo.as_ref(), Utc::now())
    }

    pub async fn gerar_cupom(
        &self,
        pool: &PgPool,
        id: Uuid,
        largura: u32,
    ) -> Result<DocumentoGerado, AppError> {
        if !LARGURAS_CUPOM.contains(&largura) {
            return Err(AppError::Validacao(
                "A largura do cupom deve ser 58 ou 80 milímetros.".to_string(),
            ));
        }

        let pedido = self
            .pedido_repo
            .buscar(pool, id)
            .await?
            .ok_or_else(|| AppError::NaoEncontrado("Pedido não encontrado.".to_string()))?;
        let config = self.configuracao_repo.buscar(pool).await?;

        cupom::renderizar(&pedido, &config, largura, Utc::now())
    }

    pub async fn gerar_catalogo(
        &self,
        pool: &PgPool,
        filtro: &FiltroProdutos,
    ) -> Result<DocumentoGerado, AppError> {
        // 1. Produtos já filtrados e a identidade visual.
        let produtos = self.produto_repo.listar(pool, filtro).await?;
        let config = self.configuracao_repo.buscar(pool).await?;
        let logo = self.buscar_logo(&config.logo_url).await;

        // 2. Resolve as fotos uma a uma; cada falha vira o quadro "sem
        //    imagem" do card, nunca um erro do catálogo inteiro.
        let mut itens = Vec::with_capacity(produtos.len());
        for produto in produtos {
            let tile = self.imagens.buscar_tile(produto.image_path.as_deref()).await;
            itens.push(ProdutoCatalogo { produto, tile });
        }

        // 3. Renderiza.
        catalogo::renderizar(&itens, &config, logo.as_ref(), filtro.ativo(), Utc::now())
    }

    async fn buscar_logo(&self, origem: &Option<String>) -> Option<RgbImage> {
        match self.imagens.buscar_tile(origem.as_deref()).await {
            ImagemTile::Pronta(imagem) => Some(imagem),
            ImagemTile::Indisponivel => None,
        }
    }
}
