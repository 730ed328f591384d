// src/handlers/catalogo.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalogo::{InsumoInput, NovoInsumo},
    services::catalog_service::CatalogState,
    services::filter::{filtrar_insumos, filtrar_por_nome},
};

// ---
// Validação customizada: preço não pode ser negativo
// ---
fn validate_preco(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O preço não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Query: termo de busca opcional
// ---
#[derive(Debug, Deserialize)]
pub struct BuscaQuery {
    pub busca: Option<String>,
}

// ---
// Handler: listar_catalogo
// Recarrega as três coleções do armazenamento (tudo ou nada) e devolve
// a visão já filtrada pelo termo de busca.
// ---
pub async fn listar_catalogo(
    State(app_state): State<AppState>,
    Query(query): Query<BuscaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let estado = app_state.catalog_service.carregar_tudo().await?;

    let termo = query.busca.unwrap_or_default();
    let visao = CatalogState {
        insumos: filtrar_insumos(&termo, &estado.insumos),
        categorias: filtrar_por_nome(&termo, &estado.categorias),
        unidades: filtrar_por_nome(&termo, &estado.unidades),
    };

    Ok((StatusCode::OK, Json(visao)))
}

// ---
// Payload: InsumoPayload (criação e atualização)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsumoPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub categoria: String,

    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unidade: String,

    #[validate(custom(function = "validate_preco"))]
    pub preco: Decimal,
}

impl From<InsumoPayload> for NovoInsumo {
    fn from(payload: InsumoPayload) -> Self {
        NovoInsumo {
            nome: payload.nome,
            unidade: payload.unidade,
            categoria: payload.categoria,
            preco: payload.preco,
        }
    }
}

// ---
// Handler: criar_insumo
// ---
pub async fn criar_insumo(
    State(app_state): State<AppState>,
    Json(payload): Json<InsumoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let insumo = app_state
        .catalog_service
        .salvar_insumo(InsumoInput::Novo(payload.into()))
        .await?;

    Ok((StatusCode::CREATED, Json(insumo)))
}

// ---
// Handler: atualizar_insumo
// A variante Existente é decidida aqui, no ponto de chamada.
// ---
pub async fn atualizar_insumo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InsumoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let insumo = app_state
        .catalog_service
        .salvar_insumo(InsumoInput::Existente {
            id,
            dados: payload.into(),
        })
        .await?;

    Ok((StatusCode::OK, Json(insumo)))
}

// ---
// Handler: excluir_insumo
// O DELETE já é a ação confirmada pelo usuário.
// ---
pub async fn excluir_insumo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.excluir_insumo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: NomePayload (categorias e unidades)
// ---
#[derive(Debug, Deserialize, Validate)]
pub struct NomePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
}

// ---
// Handlers: categorias
// ---
pub async fn criar_categoria(
    State(app_state): State<AppState>,
    Json(payload): Json<NomePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let categoria = app_state
        .catalog_service
        .criar_categoria(payload.nome.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(categoria)))
}

pub async fn atualizar_categoria(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NomePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let categoria = app_state
        .catalog_service
        .atualizar_categoria(id, payload.nome.trim())
        .await?;
    Ok((StatusCode::OK, Json(categoria)))
}

pub async fn excluir_categoria(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.excluir_categoria(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Handlers: unidades
// ---
pub async fn criar_unidade(
    State(app_state): State<AppState>,
    Json(payload): Json<NomePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let unidade = app_state
        .catalog_service
        .criar_unidade(payload.nome.trim())
        .await?;
    Ok((StatusCode::CREATED, Json(unidade)))
}

pub async fn atualizar_unidade(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NomePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let unidade = app_state
        .catalog_service
        .atualizar_unidade(id, payload.nome.trim())
        .await?;
    Ok((StatusCode::OK, Json(unidade)))
}

pub async fn excluir_unidade(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.excluir_unidade(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
