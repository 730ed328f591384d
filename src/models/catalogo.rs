// src/models/catalogo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- 1. Insumo ---
// `categoria` e `unidade` são referências POR NOME, desnormalizadas de
// propósito: renomear uma Categoria/Unidade não propaga para os insumos
// já cadastrados com o nome antigo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Insumo {
    pub id: Uuid,
    pub nome: String,
    pub unidade: String,
    pub categoria: String,
    pub preco: Decimal,
    pub created_at: DateTime<Utc>,
}

// O conjunto de campos mutáveis de um insumo. Também serve de "patch" no
// update: como `id` e `created_at` nem existem aqui, é impossível
// mandá-los por engano na mutação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoInsumo {
    pub nome: String,
    pub unidade: String,
    pub categoria: String,
    pub preco: Decimal,
}

// Variante etiquetada decidida no ponto de chamada: criar um insumo novo
// ou atualizar um existente. Nunca inferimos isso pela "forma" do payload.
#[derive(Debug, Clone)]
pub enum InsumoInput {
    Novo(NovoInsumo),
    Existente { id: Uuid, dados: NovoInsumo },
}

// --- 2. Categoria ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: Uuid,
    pub nome: String,
    pub created_at: DateTime<Utc>,
}

// --- 3. Unidade de Medida ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Unidade {
    pub id: Uuid,
    pub nome: String,
    pub created_at: DateTime<Utc>,
}

// --- 4. Sugestão da IA ---
// A resposta do serviço de sugestões tem que ter EXATAMENTE esses dois
// campos; qualquer outra forma é rejeitada no parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sugestao {
    pub categoria: String,
    pub unidade: String,
}

// Acesso uniforme ao nome, para o filtro e a ordenação genéricos.
pub trait NomeRef {
    fn nome(&self) -> &str;
}

impl NomeRef for Insumo {
    fn nome(&self) -> &str {
        &self.nome
    }
}

impl NomeRef for Categoria {
    fn nome(&self) -> &str {
        &self.nome
    }
}

impl NomeRef for Unidade {
    fn nome(&self) -> &str {
        &self.nome
    }
}

// Ordena por nome ascendente, sem diferenciar maiúsculas de minúsculas
// (mesmo critério do `ORDER BY nome ASC` do banco).
pub fn ordenar_por_nome<T: NomeRef>(itens: &mut [T]) {
    itens.sort_by(|a, b| a.nome().to_lowercase().cmp(&b.nome().to_lowercase()));
}
