// src/handlers/formulario.rs
//
// A sessão de edição do formulário de insumo (máquina de estados em
// services/form_flow.rs), incluindo a criação inline de categoria e
// unidade e a sugestão por IA. O guard do Mutex fica seguro por toda a
// operação, então nunca há duas mutações do fluxo em andamento.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::{validation_error, AppError},
    config::AppState,
    handlers::catalogo::NomePayload,
    services::form_flow::{FormFlow, RascunhoInsumo, TipoSubEntidade},
};

// ---
// Handler: estado_formulario
// ---
pub async fn estado_formulario(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let flow = app_state.form.lock().await;
    Ok((StatusCode::OK, Json(flow.clone())))
}

// ---
// Handler: abrir_formulario
// Abre com um rascunho (vazio para criação, preenchido para edição).
// ---
pub async fn abrir_formulario(
    State(app_state): State<AppState>,
    Json(rascunho): Json<RascunhoInsumo>,
) -> Result<impl IntoResponse, AppError> {
    let mut flow = app_state.form.lock().await;
    flow.abrir(rascunho);
    Ok((StatusCode::OK, Json(flow.clone())))
}

// ---
// Handler: atualizar_formulario
// ---
pub async fn atualizar_formulario(
    State(app_state): State<AppState>,
    Json(rascunho): Json<RascunhoInsumo>,
) -> Result<impl IntoResponse, AppError> {
    let mut flow = app_state.form.lock().await;
    flow.atualizar(rascunho)?;
    Ok((StatusCode::OK, Json(flow.clone())))
}

// ---
// Handler: fechar_formulario
// ---
pub async fn fechar_formulario(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut flow = app_state.form.lock().await;
    flow.fechar();
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: SubEntidadePayload
// ---
#[derive(Debug, Deserialize)]
pub struct SubEntidadePayload {
    pub tipo: TipoSubEntidade,
}

// ---
// Handler: solicitar_sub_entidade
// Suspende o rascunho do insumo e abre a criação inline.
// ---
pub async fn solicitar_sub_entidade(
    State(app_state): State<AppState>,
    Json(payload): Json<SubEntidadePayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut flow = app_state.form.lock().await;
    flow.solicitar_sub_entidade(payload.tipo)?;
    Ok((StatusCode::OK, Json(flow.clone())))
}

// ---
// Handler: confirmar_sub_entidade
// Cria a categoria/unidade pelo serviço de catálogo e, SÓ em caso de
// sucesso, retoma o rascunho com o nome novo. Um nome duplicado deixa o
// fluxo onde estava, para o usuário corrigir ou cancelar.
// ---
pub async fn confirmar_sub_entidade(
    State(app_state): State<AppState>,
    Json(payload): Json<NomePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut flow = app_state.form.lock().await;
    let tipo = flow.tipo_sub_entidade().ok_or_else(|| {
        validation_error(
            "formulario",
            "estado_invalido",
            "Nenhuma criação inline em andamento para concluir.",
        )
    })?;

    let nome = payload.nome.trim();
    let nome_criado = match tipo {
        TipoSubEntidade::Categoria => app_state.catalog_service.criar_categoria(nome).await?.nome,
        TipoSubEntidade::Unidade => app_state.catalog_service.criar_unidade(nome).await?.nome,
    };

    flow.concluir_sub_entidade(&nome_criado)?;
    Ok((StatusCode::CREATED, Json(flow.clone())))
}

// ---
// Handler: cancelar_sub_entidade
// ---
pub async fn cancelar_sub_entidade(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut flow = app_state.form.lock().await;
    flow.cancelar_sub_entidade()?;
    Ok((StatusCode::OK, Json(flow.clone())))
}

// ---
// Handler: sugerir_para_formulario
// Consulta o serviço de sugestões com o nome do rascunho atual e mescla
// o resultado nos campos ainda em branco. O estado é verificado ANTES
// da chamada externa: fora de EditandoInsumo (inclusive durante uma
// criação inline) a falha é local e o serviço nem é consultado.
// ---
pub async fn sugerir_para_formulario(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let mut flow = app_state.form.lock().await;
    let nome = match &*flow {
        FormFlow::EditandoInsumo { rascunho } => rascunho.nome.clone(),
        _ => {
            return Err(validation_error(
                "formulario",
                "estado_invalido",
                "Nenhum insumo em edição para receber a sugestão.",
            ));
        }
    };

    let sugestao = app_state.suggestion_service.sugerir(&nome).await?;
    flow.aplicar_sugestao(&sugestao)?;

    Ok((
        StatusCode::OK,
        Json(json!({ "sugestao": sugestao, "formulario": flow.clone() })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::config::AppState;
    use crate::db::mem_store::MemCatalogStore;
    use crate::services::suggestion_service::SuggestionClient;

    // Cliente que conta as chamadas; devolve sempre uma resposta válida.
    #[derive(Default)]
    struct ClienteContador {
        chamadas: AtomicUsize,
    }

    #[async_trait]
    impl SuggestionClient for ClienteContador {
        async fn gerar(&self, _prompt: &str) -> Result<String, AppError> {
            self.chamadas.fetch_add(1, Ordering::SeqCst);
            Ok(r#"{"categoria": "Grãos", "unidade": "kg"}"#.to_string())
        }
    }

    #[tokio::test]
    async fn sugestao_durante_criacao_inline_falha_sem_chamar_o_servico() {
        let cliente = Arc::new(ClienteContador::default());
        let app_state =
            AppState::para_testes(Arc::new(MemCatalogStore::new()), cliente.clone());

        // Rascunho em edição, suspenso pela criação inline de categoria.
        {
            let mut flow = app_state.form.lock().await;
            flow.abrir(RascunhoInsumo {
                nome: "Suco".to_string(),
                ..Default::default()
            });
            flow.solicitar_sub_entidade(TipoSubEntidade::Categoria).unwrap();
        }

        let erro = sugerir_para_formulario(State(app_state.clone())).await;
        assert!(matches!(erro, Err(AppError::ValidationError(_))));

        // A falha é local: o serviço de sugestões nunca foi consultado e
        // o fluxo continua na criação inline.
        assert_eq!(cliente.chamadas.load(Ordering::SeqCst), 0);
        let flow = app_state.form.lock().await;
        assert!(matches!(&*flow, FormFlow::EditandoSubEntidade { .. }));
    }

    #[tokio::test]
    async fn sugestao_em_edicao_direta_consulta_e_mescla() {
        let cliente = Arc::new(ClienteContador::default());
        let app_state =
            AppState::para_testes(Arc::new(MemCatalogStore::new()), cliente.clone());

        {
            let mut flow = app_state.form.lock().await;
            flow.abrir(RascunhoInsumo {
                nome: "Arroz".to_string(),
                ..Default::default()
            });
        }

        sugerir_para_formulario(State(app_state.clone())).await.unwrap();
        assert_eq!(cliente.chamadas.load(Ordering::SeqCst), 1);

        let flow = app_state.form.lock().await;
        let rascunho = flow.rascunho().unwrap();
        assert_eq!(rascunho.categoria, "Grãos");
        assert_eq!(rascunho.unidade, "kg");
    }
}
