// src/handlers.rs

pub mod clientes;
pub mod configuracoes;
pub mod documentos;
pub mod pagamentos;
pub mod pedidos;
pub mod produtos;
pub mod sistema;
pub mod upload;
