// src/services/catalog_service.rs

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogStore,
    models::catalogo::{ordenar_por_nome, Categoria, Insumo, InsumoInput, Unidade},
};

// As três coleções em memória, sempre atualizadas DEPOIS que o
// armazenamento confirma a mutação (nada de update otimista).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    pub insumos: Vec<Insumo>,
    pub categorias: Vec<Categoria>,
    pub unidades: Vec<Unidade>,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    estado: Arc<RwLock<CatalogState>>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            estado: Arc::new(RwLock::new(CatalogState::default())),
        }
    }

    // Busca as três coleções em paralelo e só então troca o estado, de
    // uma vez. Se QUALQUER uma das três falhar, nada é aplicado e o
    // estado anterior permanece intacto.
    pub async fn carregar_tudo(&self) -> Result<CatalogState, AppError> {
        let (insumos, categorias, unidades) = tokio::try_join!(
            self.store.listar_insumos(),
            self.store.listar_categorias(),
            self.store.listar_unidades(),
        )?;

        let novo_estado = CatalogState {
            insumos,
            categorias,
            unidades,
        };
        let mut estado = self.estado.write().await;
        *estado = novo_estado.clone();
        Ok(novo_estado)
    }

    pub async fn snapshot(&self) -> CatalogState {
        self.estado.read().await.clone()
    }

    // --- Insumos ---

    // A variante do input foi decidida no ponto de chamada: criar ou
    // atualizar. No update, o patch é o próprio NovoInsumo, então id e
    // created_at ficam estruturalmente de fora da mutação.
    pub async fn salvar_insumo(&self, input: InsumoInput) -> Result<Insumo, AppError> {
        match input {
            InsumoInput::Novo(novo) => {
                let criado = self.store.inserir_insumo(&novo).await?;
                let mut estado = self.estado.write().await;
                estado.insumos.push(criado.clone());
                ordenar_por_nome(&mut estado.insumos);
                tracing::info!("Insumo '{}' criado.", criado.nome);
                Ok(criado)
            }
            InsumoInput::Existente { id, dados } => {
                let atualizado = self.store.atualizar_insumo(id, &dados).await?;
                let mut estado = self.estado.write().await;
                if let Some(insumo) = estado.insumos.iter_mut().find(|i| i.id == id) {
                    *insumo = atualizado.clone();
                }
                Ok(atualizado)
            }
        }
    }

    // A confirmação ("tem certeza?") é responsabilidade de quem chama;
    // aqui o DELETE já é a ação confirmada.
    pub async fn excluir_insumo(&self, id: Uuid) -> Result<(), AppError> {
        self.store.excluir_insumo(id).await?;
        let mut estado = self.estado.write().await;
        estado.insumos.retain(|i| i.id != id);
        Ok(())
    }

    // --- Categorias ---

    pub async fn criar_categoria(&self, nome: &str) -> Result<Categoria, AppError> {
        let criada = self.store.inserir_categoria(nome).await?;
        let mut estado = self.estado.write().await;
        estado.categorias.push(criada.clone());
        ordenar_por_nome(&mut estado.categorias);
        Ok(criada)
    }

    // Renomear uma categoria NÃO propaga para os insumos já marcados com
    // o nome antigo (referência por nome, desnormalizada).
    pub async fn atualizar_categoria(&self, id: Uuid, nome: &str) -> Result<Categoria, AppError> {
        let atualizada = self.store.atualizar_categoria(id, nome).await?;
        let mut estado = self.estado.write().await;
        if let Some(categoria) = estado.categorias.iter_mut().find(|c| c.id == id) {
            *categoria = atualizada.clone();
        }
        Ok(atualizada)
    }

    pub async fn excluir_categoria(&self, id: Uuid) -> Result<(), AppError> {
        self.store.excluir_categoria(id).await?;
        let mut estado = self.estado.write().await;
        estado.categorias.retain(|c| c.id != id);
        Ok(())
    }

    // --- Unidades ---

    pub async fn criar_unidade(&self, nome: &str) -> Result<Unidade, AppError> {
        let criada = self.store.inserir_unidade(nome).await?;
        let mut estado = self.estado.write().await;
        estado.unidades.push(criada.clone());
        ordenar_por_nome(&mut estado.unidades);
        Ok(criada)
    }

    pub async fn atualizar_unidade(&self, id: Uuid, nome: &str) -> Result<Unidade, AppError> {
        let atualizada = self.store.atualizar_unidade(id, nome).await?;
        let mut estado = self.estado.write().await;
        if let Some(unidade) = estado.unidades.iter_mut().find(|u| u.id == id) {
            *unidade = atualizada.clone();
        }
        Ok(atualizada)
    }

    pub async fn excluir_unidade(&self, id: Uuid) -> Result<(), AppError> {
        self.store.excluir_unidade(id).await?;
        let mut estado = self.estado.write().await;
        estado.unidades.retain(|u| u.id != id);
        Ok(())
    }
}
