// src/db/pg_store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::CatalogStore,
    models::catalogo::{Categoria, Insumo, NovoInsumo, Unidade},
};

// A implementação de produção do CatalogStore, sobre Postgres.
// A conversão `From<sqlx::Error>` em common/error.rs já transforma
// violação de chave única em DuplicateName, então aqui basta o `?`.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    // --- Insumos ---

    async fn listar_insumos(&self) -> Result<Vec<Insumo>, AppError> {
        let insumos = sqlx::query_as::<_, Insumo>("SELECT * FROM insumos ORDER BY lower(nome) ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(insumos)
    }

    async fn inserir_insumo(&self, novo: &NovoInsumo) -> Result<Insumo, AppError> {
        let insumo = sqlx::query_as::<_, Insumo>(
            "INSERT INTO insumos (nome, unidade, categoria, preco) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&novo.nome)
        .bind(&novo.unidade)
        .bind(&novo.categoria)
        .bind(novo.preco)
        .fetch_one(&self.pool)
        .await?;
        Ok(insumo)
    }

    async fn atualizar_insumo(&self, id: Uuid, dados: &NovoInsumo) -> Result<Insumo, AppError> {
        // `id` e `created_at` nunca entram no UPDATE: o tipo NovoInsumo
        // só carrega os campos mutáveis.
        let insumo = sqlx::query_as::<_, Insumo>(
            "UPDATE insumos SET nome = $2, unidade = $3, categoria = $4, preco = $5 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&dados.nome)
        .bind(&dados.unidade)
        .bind(&dados.categoria)
        .bind(dados.preco)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(insumo)
    }

    async fn excluir_insumo(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM insumos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // --- Categorias ---

    async fn listar_categorias(&self) -> Result<Vec<Categoria>, AppError> {
        let categorias =
            sqlx::query_as::<_, Categoria>("SELECT * FROM categorias ORDER BY lower(nome) ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(categorias)
    }

    async fn inserir_categoria(&self, nome: &str) -> Result<Categoria, AppError> {
        let categoria = sqlx::query_as::<_, Categoria>(
            "INSERT INTO categorias (nome) VALUES ($1) RETURNING *",
        )
        .bind(nome)
        .fetch_one(&self.pool)
        .await?;
        Ok(categoria)
    }

    async fn atualizar_categoria(&self, id: Uuid, nome: &str) -> Result<Categoria, AppError> {
        let categoria = sqlx::query_as::<_, Categoria>(
            "UPDATE categorias SET nome = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(nome)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(categoria)
    }

    async fn excluir_categoria(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // --- Unidades ---

    async fn listar_unidades(&self) -> Result<Vec<Unidade>, AppError> {
        let unidades =
            sqlx::query_as::<_, Unidade>("SELECT * FROM unidades ORDER BY lower(nome) ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(unidades)
    }

    async fn inserir_unidade(&self, nome: &str) -> Result<Unidade, AppError> {
        let unidade =
            sqlx::query_as::<_, Unidade>("INSERT INTO unidades (nome) VALUES ($1) RETURNING *")
                .bind(nome)
                .fetch_one(&self.pool)
                .await?;
        Ok(unidade)
    }

    async fn atualizar_unidade(&self, id: Uuid, nome: &str) -> Result<Unidade, AppError> {
        let unidade = sqlx::query_as::<_, Unidade>(
            "UPDATE unidades SET nome = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(nome)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;
        Ok(unidade)
    }

    async fn excluir_unidade(&self, id: Uuid) -> Result<(), AppError> {
        let resultado = sqlx::query("DELETE FROM unidades WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if resultado.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
