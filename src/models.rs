// src/models.rs

pub mod cliente;
pub mod configuracao;
pub mod pagamento;
pub mod pedido;
pub mod produto;
