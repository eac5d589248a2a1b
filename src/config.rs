// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, path::PathBuf, time::Duration};

use crate::{
    db::{
        ClienteRepository, ConfiguracaoRepository, MarcaRepository, PedidoRepository,
        ProdutoRepository, SequenciaRepository,
    },
    services::{
        pdf::imagem::BuscadorImagens, ClienteService, ConfiguracaoService, DocumentoService,
        NumeracaoService, PagamentoService, PedidoService, ProdutoService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    // Pasta pública onde o upload grava e o ServeDir lê.
    pub dir_uploads: PathBuf,
    pub pedido_service: PedidoService,
    pub pagamento_service: PagamentoService,
    pub cliente_service: ClienteService,
    pub produto_service: ProdutoService,
    pub configuracao_service: ConfiguracaoService,
    pub documento_service: DocumentoService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let dir_uploads =
            PathBuf::from(env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string()));

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        std::fs::create_dir_all(&dir_uploads)?;

        // --- Monta o gráfico de dependências ---
        let cliente_repo = ClienteRepository::new(db_pool.clone());
        let marca_repo = MarcaRepository::new(db_pool.clone());
        let produto_repo = ProdutoRepository::new(db_pool.clone());
        let pedido_repo = PedidoRepository::new(db_pool.clone());
        let sequencia_repo = SequenciaRepository::new(db_pool.clone());
        let configuracao_repo = ConfiguracaoRepository::new(db_pool.clone());

        let numeracao_service = NumeracaoService::new(sequencia_repo);
        let pedido_service = PedidoService::new(
            pedido_repo.clone(),
            cliente_repo.clone(),
            numeracao_service,
        );
        let pagamento_service = PagamentoService::new(pedido_repo.clone());
        let cliente_service = ClienteService::new(cliente_repo);
        let produto_service = ProdutoService::new(produto_repo.clone(), marca_repo);
        let configuracao_service = ConfiguracaoService::new(configuracao_repo.clone());
        let documento_service = DocumentoService::new(
            pedido_repo,
            produto_repo,
            configuracao_repo,
            BuscadorImagens::new(dir_uploads.clone()),
        );

        Ok(Self {
            db_pool,
            dir_uploads,
            pedido_service,
            pagamento_service,
            cliente_service,
            produto_service,
            configuracao_service,
            documento_service,
        })
    }
}
