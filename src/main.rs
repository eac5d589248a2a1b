//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::handlers::upload::LIMITE_UPLOAD_BYTES;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let rotas_clientes = Router::new()
        .route(
            "/",
            post(handlers::clientes::criar_cliente).get(handlers::clientes::listar_clientes),
        )
        .route(
            "/{id}",
            get(handlers::clientes::obter_cliente)
                .put(handlers::clientes::atualizar_cliente)
                .delete(handlers::clientes::remover_cliente),
        );

    let rotas_marcas = Router::new()
        .route(
            "/",
            post(handlers::produtos::criar_marca).get(handlers::produtos::listar_marcas),
        )
        .route("/{id}", axum::routing::delete(handlers::produtos::remover_marca));

    let rotas_produtos = Router::new()
        .route(
            "/",
            post(handlers::produtos::criar_produto).get(handlers::produtos::listar_produtos),
        )
        .route(
            "/{id}",
            get(handlers::produtos::obter_produto)
                .put(handlers::produtos::atualizar_produto)
                .delete(handlers::produtos::remover_produto),
        );

    let rotas_pedidos = Router::new()
        .route(
            "/",
            post(handlers::pedidos::criar_pedido).get(handlers::pedidos::listar_pedidos),
        )
        .route(
            "/{id}",
            get(handlers::pedidos::obter_pedido)
                .put(handlers::pedidos::atualizar_pedido)
                .delete(handlers::pedidos::remover_pedido),
        )
        .route("/{id}/finalizar", post(handlers::pedidos::finalizar_pedido))
        .route("/{id}/cancelar", post(handlers::pedidos::cancelar_pedido))
        // Documentos do pedido
        .route("/{id}/pdf", get(handlers::documentos::baixar_pdf_pedido))
        .route("/{id}/cupom", get(handlers::documentos::baixar_cupom_pedido));

    let rotas_configuracoes = Router::new().route(
        "/",
        get(handlers::configuracoes::obter_configuracoes)
            .put(handlers::configuracoes::salvar_configuracoes),
    );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(handlers::sistema::verificar_saude))
        .route(
            "/api/pagamentos/pendentes",
            get(handlers::pagamentos::listar_pagamentos_pendentes),
        )
        .route("/api/catalogo/pdf", get(handlers::documentos::baixar_catalogo))
        .route(
            "/api/upload-image",
            post(handlers::upload::enviar_imagem)
                // O corpo aceita um pouco mais que o teto do arquivo, por
                // causa do envelope multipart.
                .layer(DefaultBodyLimit::max(LIMITE_UPLOAD_BYTES + 1024 * 1024)),
        )
        .nest("/api/clientes", rotas_clientes)
        .nest("/api/marcas", rotas_marcas)
        .nest("/api/produtos", rotas_produtos)
        .nest("/api/pedidos", rotas_pedidos)
        .nest("/api/configuracoes", rotas_configuracoes)
        .nest_service("/uploads", ServeDir::new(app_state.dir_uploads.clone()))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let porta = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", porta);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
