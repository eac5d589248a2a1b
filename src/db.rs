pub mod cliente_repo;
pub use cliente_repo::ClienteRepository;
pub mod marca_repo;
pub use marca_repo::MarcaRepository;
pub mod produto_repo;
pub use produto_repo::ProdutoRepository;
pub mod pedido_repo;
pub use pedido_repo::PedidoRepository;
pub mod sequencia_repo;
pub use sequencia_repo::SequenciaRepository;
pub mod configuracao_repo;
pub use configuracao_repo::ConfiguracaoRepository;
