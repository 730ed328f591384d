// src/handlers/pedidos.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, handlers::catalogo::BuscaQuery};

// ---
// Handler: listar_pedidos
// O catálogo inteiro agrupado por categoria, com a quantidade do
// carrinho sobreposta em cada item. Recarrega as coleções do
// armazenamento a cada listagem, como a tela de pedidos faz ao abrir;
// num processo recém-iniciado o snapshot ainda está vazio.
// ---
pub async fn listar_pedidos(
    State(app_state): State<AppState>,
    Query(query): Query<BuscaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let estado = app_state.catalog_service.carregar_tudo().await?;
    let termo = query.busca.unwrap_or_default();
    let grupos = app_state
        .cart_service
        .agrupar_por_categoria(&termo, &estado.insumos)
        .await;
    Ok((StatusCode::OK, Json(grupos)))
}

// ---
// Handler: resumo_carrinho
// ---
pub async fn resumo_carrinho(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let estado = app_state.catalog_service.snapshot().await;
    let resumo = app_state.cart_service.resumo(&estado.insumos).await;
    Ok((StatusCode::OK, Json(resumo)))
}

// ---
// Payload: QuantidadePayload
// A quantidade é um inteiro não negativo; zero remove o item.
// ---
#[derive(Debug, Deserialize)]
pub struct QuantidadePayload {
    pub quantidade: u32,
}

// ---
// Handler: definir_quantidade
// A existência do insumo é conferida contra o catálogo recarregado, não
// contra o snapshot, que pode nunca ter sido populado neste processo.
// ---
pub async fn definir_quantidade(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<QuantidadePayload>,
) -> Result<impl IntoResponse, AppError> {
    let estado = app_state.catalog_service.carregar_tudo().await?;
    if !estado.insumos.iter().any(|i| i.id == id) {
        return Err(AppError::NotFound);
    }

    app_state
        .cart_service
        .definir_quantidade(id, payload.quantidade)
        .await;

    let resumo = app_state.cart_service.resumo(&estado.insumos).await;
    Ok((StatusCode::OK, Json(resumo)))
}

// ---
// Handler: confirmar_pedido
// Devolve o resumo final e esvazia o carrinho.
// ---
pub async fn confirmar_pedido(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let estado = app_state.catalog_service.snapshot().await;
    let resumo = app_state.cart_service.resumo(&estado.insumos).await;
    app_state.cart_service.limpar().await;

    tracing::info!(
        "Pedido confirmado: {} itens, total {}",
        resumo.total_itens,
        resumo.total
    );
    Ok((StatusCode::OK, Json(resumo)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use crate::config::AppState;
    use crate::db::mem_store::MemCatalogStore;
    use crate::db::CatalogStore;
    use crate::models::catalogo::NovoInsumo;
    use crate::services::suggestion_service::GeminiClient;

    async fn corpo_json(resposta: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resposta.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn farinha() -> NovoInsumo {
        NovoInsumo {
            nome: "Farinha".to_string(),
            unidade: "kg".to_string(),
            categoria: "Grãos".to_string(),
            preco: Decimal::new(1250, 2),
        }
    }

    fn app_state_com(store: MemCatalogStore) -> AppState {
        AppState::para_testes(Arc::new(store), Arc::new(GeminiClient::new(None)))
    }

    #[tokio::test]
    async fn listar_pedidos_recarrega_o_catalogo_em_processo_recem_iniciado() {
        // O armazenamento já tem linhas, mas nada populou o snapshot
        // ainda: a listagem de pedidos tem que recarregar sozinha.
        let app_state = app_state_com(MemCatalogStore::new().com_insumos(&[farinha()]));

        let resposta = listar_pedidos(State(app_state), Query(BuscaQuery { busca: None }))
            .await
            .unwrap()
            .into_response();
        let corpo = corpo_json(resposta).await;

        let grupos = corpo.as_array().unwrap();
        assert_eq!(grupos.len(), 1);
        assert_eq!(grupos[0]["categoria"], "Grãos");
        assert_eq!(grupos[0]["insumos"][0]["nome"], "Farinha");
    }

    #[tokio::test]
    async fn definir_quantidade_enxerga_insumo_que_so_existe_no_armazenamento() {
        let store = MemCatalogStore::new().com_insumos(&[farinha()]);
        let id = store.listar_insumos().await.unwrap()[0].id;
        let app_state = app_state_com(store);

        let resposta = definir_quantidade(
            State(app_state),
            Path(id),
            Json(QuantidadePayload { quantidade: 3 }),
        )
        .await
        .unwrap()
        .into_response();
        let corpo = corpo_json(resposta).await;

        assert_eq!(corpo["totalItens"], 3);
        assert_eq!(corpo["total"], 37.5);
    }
}
