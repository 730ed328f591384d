//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
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

    // Catálogo: recarga + CRUD de insumos, categorias e unidades
    let catalogo_routes = Router::new()
        .route("/", get(handlers::catalogo::listar_catalogo))
        .route("/insumos", post(handlers::catalogo::criar_insumo))
        .route(
            "/insumos/{id}",
            put(handlers::catalogo::atualizar_insumo).delete(handlers::catalogo::excluir_insumo),
        )
        .route("/categorias", post(handlers::catalogo::criar_categoria))
        .route(
            "/categorias/{id}",
            put(handlers::catalogo::atualizar_categoria)
                .delete(handlers::catalogo::excluir_categoria),
        )
        .route("/unidades", post(handlers::catalogo::criar_unidade))
        .route(
            "/unidades/{id}",
            put(handlers::catalogo::atualizar_unidade).delete(handlers::catalogo::excluir_unidade),
        );

    // A sessão do formulário de insumo, com criação inline e sugestão por IA
    let formulario_routes = Router::new()
        .route(
            "/",
            get(handlers::formulario::estado_formulario)
                .post(handlers::formulario::abrir_formulario)
                .put(handlers::formulario::atualizar_formulario),
        )
        .route("/fechar", post(handlers::formulario::fechar_formulario))
        .route(
            "/sub-entidade",
            post(handlers::formulario::solicitar_sub_entidade),
        )
        .route(
            "/sub-entidade/confirmar",
            post(handlers::formulario::confirmar_sub_entidade),
        )
        .route(
            "/sub-entidade/cancelar",
            post(handlers::formulario::cancelar_sub_entidade),
        )
        .route("/sugestao", post(handlers::formulario::sugerir_para_formulario));

    // Pedidos: catálogo agrupado por categoria + carrinho
    let pedidos_routes = Router::new()
        .route("/", get(handlers::pedidos::listar_pedidos))
        .route("/carrinho", get(handlers::pedidos::resumo_carrinho))
        .route(
            "/carrinho/itens/{id}",
            put(handlers::pedidos::definir_quantidade),
        )
        .route(
            "/carrinho/confirmar",
            post(handlers::pedidos::confirmar_pedido),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/catalogo", catalogo_routes)
        .nest("/api/catalogo/formulario", formulario_routes)
        .nest("/api/pedidos", pedidos_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
