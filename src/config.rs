// src/config.rs

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::Mutex;

use crate::{
    db::{CatalogStore, PgCatalogStore},
    services::form_flow::FormFlow,
    services::suggestion_service::GeminiClient,
    services::{CartService, CatalogService, SuggestionService},
};

#[cfg(test)]
use crate::services::suggestion_service::SuggestionClient;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_service: CatalogService,
    pub cart_service: CartService,
    pub suggestion_service: SuggestionService,
    // A sessão única de edição do formulário de insumo.
    pub form: Arc<Mutex<FormFlow>>,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        // A chave do Gemini é opcional: sem ela as sugestões por IA
        // ficam desabilitadas, o resto funciona normalmente.
        let gemini_api_key = env::var("GEMINI_API_KEY").ok();
        if gemini_api_key.is_none() {
            tracing::warn!(
                "API Key do Gemini não encontrada. As funcionalidades de IA estarão desabilitadas."
            );
        }

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        // Os clientes externos são construídos aqui e injetados nos
        // serviços; nada de singleton global.
        let store: Arc<dyn CatalogStore> = Arc::new(PgCatalogStore::new(db_pool.clone()));
        let catalog_service = CatalogService::new(store);
        let cart_service = CartService::new();
        let suggestion_service =
            SuggestionService::new(Arc::new(GeminiClient::new(gemini_api_key)));

        Ok(Self {
            db_pool,
            catalog_service,
            cart_service,
            suggestion_service,
            form: Arc::new(Mutex::new(FormFlow::default())),
        })
    }

    // Estado para testes de handler: store e cliente de sugestões
    // injetados, pool preguiçoso que nunca é tocado.
    #[cfg(test)]
    pub fn para_testes(store: Arc<dyn CatalogStore>, client: Arc<dyn SuggestionClient>) -> Self {
        let db_pool = PgPool::connect_lazy("postgres://localhost/insumos_teste")
            .expect("URL de teste inválida");
        Self {
            db_pool,
            catalog_service: CatalogService::new(store),
            cart_service: CartService::new(),
            suggestion_service: SuggestionService::new(client),
            form: Arc::new(Mutex::new(FormFlow::default())),
        }
    }
}
