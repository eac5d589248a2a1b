// src/services.rs

pub mod cliente_service;
pub use cliente_service::ClienteService;

pub mod configuracao_service;
pub use configuracao_service::ConfiguracaoService;

pub mod documento_service;
pub use documento_service::DocumentoService;

pub mod numeracao_service;
pub use numeracao_service::NumeracaoService;

pub mod pagamento_service;
pub use pagamento_service::PagamentoService;

pub mod pedido_service;
pub use pedido_service::PedidoService;

pub mod produto_service;
pub use produto_service::ProdutoService;

pub mod pdf;
