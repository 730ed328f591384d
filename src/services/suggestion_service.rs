// src/services/suggestion_service.rs
//
// A ponte para o serviço de sugestões por IA. O serviço externo é
// representado pelo trait SuggestionClient (injetado na construção);
// a implementação de produção chama o endpoint generateContent do
// Gemini via reqwest, pedindo JSON no formato de dois campos.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::common::error::{validation_error, AppError};
use crate::models::catalogo::Sugestao;

const MODELO: &str = "gemini-2.5-flash";
const API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[async_trait]
pub trait SuggestionClient: Send + Sync {
    // Devolve o texto bruto da resposta; o parse estrito fica com o
    // serviço.
    async fn gerar(&self, prompt: &str) -> Result<String, AppError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl GeminiClient {
    // A chave é opcional: sem ela o processo sobe normalmente e só as
    // sugestões ficam indisponíveis.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl SuggestionClient for GeminiClient {
    async fn gerar(&self, prompt: &str) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::UpstreamError("API Key do Gemini não configurada.".to_string())
        })?;

        let corpo = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "categoria": {
                            "type": "STRING",
                            "description": "Uma categoria adequada para o insumo. Exemplos: Grãos, Laticínios, Limpeza, Escritório, Hortifruti."
                        },
                        "unidade": {
                            "type": "STRING",
                            "description": "A unidade de medida mais comum para este insumo. Exemplos: kg, g, L, ml, unidade(s), caixa(s), pacote(s)."
                        }
                    },
                    "required": ["categoria", "unidade"]
                }
            }
        });

        let resposta = self
            .http
            .post(format!("{API_URL}/{MODELO}:generateContent"))
            .header("x-goog-api-key", api_key)
            .json(&corpo)
            .send()
            .await?;

        if !resposta.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "Gemini retornou status {}",
                resposta.status()
            )));
        }

        let corpo: serde_json::Value = resposta.json().await?;
        let texto = corpo
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::UpstreamError("Resposta do Gemini sem texto de candidato.".to_string())
            })?;
        Ok(texto.trim().to_string())
    }
}

#[derive(Clone)]
pub struct SuggestionService {
    client: Arc<dyn SuggestionClient>,
}

impl SuggestionService {
    pub fn new(client: Arc<dyn SuggestionClient>) -> Self {
        Self { client }
    }

    // Nome vazio é barrado localmente, sem nenhuma chamada ao serviço.
    // O resultado é consultivo: quem decide o que fazer com ele é o
    // fluxo do formulário.
    pub async fn sugerir(&self, nome: &str) -> Result<Sugestao, AppError> {
        let nome = nome.trim();
        if nome.is_empty() {
            return Err(validation_error(
                "nome",
                "required",
                "Digite o nome do item para obter sugestões.",
            ));
        }

        let prompt = format!(
            "Para o insumo de estoque chamado \"{nome}\", sugira a melhor categoria e unidade de medida. Responda em português do Brasil."
        );
        let texto = self.client.gerar(&prompt).await?;

        // O parse é estrito: qualquer coisa fora do formato de dois
        // campos é uma falha do serviço externo.
        serde_json::from_str::<Sugestao>(texto.trim())
            .map_err(|e| AppError::UpstreamError(format!("Sugestão em formato inesperado: {e}")))
    }
}
