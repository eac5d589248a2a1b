// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Pedidos ---
        handlers::pedidos::criar_pedido,
        handlers::pedidos::listar_pedidos,
        handlers::pedidos::obter_pedido,
        handlers::pedidos::atualizar_pedido,
        handlers::pedidos::finalizar_pedido,
        handlers::pedidos::cancelar_pedido,
        handlers::pedidos::remover_pedido,

        // --- Pagamentos ---
        handlers::pagamentos::listar_pagamentos_pendentes,

        // --- Documentos ---
        handlers::documentos::baixar_pdf_pedido,
        handlers::documentos::baixar_cupom_pedido,
        handlers::documentos::baixar_catalogo,

        // --- Clientes ---
        handlers::clientes::criar_cliente,
        handlers::clientes::listar_clientes,
        handlers::clientes::obter_cliente,
        handlers::clientes::atualizar_cliente,
        handlers::clientes::remover_cliente,

        // --- Produtos ---
        handlers::produtos::criar_produto,
        handlers::produtos::listar_produtos,
        handlers::produtos::obter_produto,
        handlers::produtos::atualizar_produto,
        handlers::produtos::remover_produto,

        // --- Marcas ---
        handlers::produtos::criar_marca,
        handlers::produtos::listar_marcas,
        handlers::produtos::remover_marca,

        // --- Configurações ---
        handlers::configuracoes::obter_configuracoes,
        handlers::configuracoes::salvar_configuracoes,

        // --- Upload e Sistema ---
        handlers::upload::enviar_imagem,
        handlers::sistema::verificar_saude,
    ),
    components(
        schemas(
            // --- Pedidos ---
            models::pedido::StatusPedido,
            models::pedido::ClienteResumo,
            models::pedido::ItemPedido,
            models::pedido::Pedido,
            handlers::pedidos::ItemPedidoPayload,
            handlers::pedidos::CriarPedidoPayload,
            handlers::pedidos::AtualizarPedidoPayload,

            // --- Pagamentos ---
            models::pagamento::StatusPagamento,
            models::pagamento::PagamentoPendente,

            // --- Clientes ---
            models::cliente::TipoCliente,
            models::cliente::Cliente,
            handlers::clientes::ClientePayload,

            // --- Produtos ---
            models::produto::Produto,
            models::produto::Marca,
            handlers::produtos::ProdutoPayload,
            handlers::produtos::MarcaPayload,

            // --- Configurações ---
            models::configuracao::ConfiguracaoCatalogo,
            models::configuracao::AtualizarConfiguracaoPayload,
        )
    ),
    tags(
        (name = "Pedidos", description = "Ciclo de vida dos pedidos de venda"),
        (name = "Pagamentos", description = "Situação de pagamento dos pedidos em aberto"),
        (name = "Documentos", description = "PDF do pedido, cupom de bobina e catálogo de produtos"),
        (name = "Clientes", description = "Cadastro de clientes (CPF e CNPJ)"),
        (name = "Produtos", description = "Cadastro de produtos do catálogo"),
        (name = "Marcas", description = "Marcas usadas nos filtros do catálogo"),
        (name = "Configurações", description = "Identidade visual e dados da empresa"),
        (name = "Upload", description = "Recebimento de imagens de produto"),
        (name = "Sistema", description = "Saúde do serviço")
    )
)]
pub struct ApiDoc;
