// src/db/store.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalogo::{Categoria, Insumo, NovoInsumo, Unidade},
};

// A interface estreita de CRUD sobre o armazenamento remoto de tabelas.
// O serviço de catálogo só conhece este trait; a implementação concreta
// (Postgres em produção, memória nos testes) é injetada na construção.
//
// Contrato comum a todos os métodos:
// - as listagens voltam ordenadas por nome ascendente;
// - insert/update devolvem a linha canônica (id e created_at atribuídos
//   pelo armazenamento);
// - violação de unicidade de nome vira `AppError::DuplicateName`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- Insumos ---
    async fn listar_insumos(&self) -> Result<Vec<Insumo>, AppError>;
    async fn inserir_insumo(&self, novo: &NovoInsumo) -> Result<Insumo, AppError>;
    async fn atualizar_insumo(&self, id: Uuid, dados: &NovoInsumo) -> Result<Insumo, AppError>;
    async fn excluir_insumo(&self, id: Uuid) -> Result<(), AppError>;

    // --- Categorias ---
    async fn listar_categorias(&self) -> Result<Vec<Categoria>, AppError>;
    async fn inserir_categoria(&self, nome: &str) -> Result<Categoria, AppError>;
    async fn atualizar_categoria(&self, id: Uuid, nome: &str) -> Result<Categoria, AppError>;
    async fn excluir_categoria(&self, id: Uuid) -> Result<(), AppError>;

    // --- Unidades ---
    async fn listar_unidades(&self) -> Result<Vec<Unidade>, AppError>;
    async fn inserir_unidade(&self, nome: &str) -> Result<Unidade, AppError>;
    async fn atualizar_unidade(&self, id: Uuid, nome: &str) -> Result<Unidade, AppError>;
    async fn excluir_unidade(&self, id: Uuid) -> Result<(), AppError>;
}
