use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia é pequena de propósito: erro de validação (detectado
// localmente, antes de qualquer chamada remota), nome duplicado (violação
// de unicidade reportada pelo armazenamento), falha de armazenamento,
// falha do serviço de sugestões e o genérico para o resto.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Nome duplicado: {0}")]
    DuplicateName(String),

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Erro no armazenamento de dados: {0}")]
    StoreError(String),

    #[error("Falha no serviço de sugestões: {0}")]
    UpstreamError(String),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// Conversão manual (sem `#[from]`) porque precisamos inspecionar o erro:
// violação de chave única vira DuplicateName, linha ausente vira NotFound,
// e o resto vira uma falha genérica de armazenamento.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(e, sqlx::Error::RowNotFound) {
            return AppError::NotFound;
        }
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::DuplicateName(db_err.message().to_string());
            }
        }
        AppError::StoreError(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::UpstreamError(e.to_string())
    }
}

// Helper para erros de validação detectados fora do `validator` derive
// (campo vazio na sugestão, transição ilegal do formulário).
pub fn validation_error(
    campo: &'static str,
    codigo: &'static str,
    mensagem: &'static str,
) -> AppError {
    let mut erro = validator::ValidationError::new(codigo);
    erro.message = Some(mensagem.into());
    let mut erros = validator::ValidationErrors::new();
    erros.add(campo, erro);
    AppError::ValidationError(erros)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::DuplicateName(_) => (StatusCode::CONFLICT, "Esse nome já está em uso."),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Registro não encontrado."),
            AppError::UpstreamError(ref e) => {
                tracing::error!("Falha no serviço de sugestões: {}", e);
                (StatusCode::BAD_GATEWAY, "Não foi possível obter sugestões da IA. Tente novamente.")
            }

            // Todos os outros erros (StoreError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
