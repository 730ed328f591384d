// src/db/mem_store.rs
//
// Implementação em memória do CatalogStore, usada nos testes dos
// serviços. Reproduz o contrato do armazenamento real: listagens
// ordenadas por nome, linha canônica de volta no insert/update e
// violação de unicidade de nome como DuplicateName. Também permite
// injetar falha por coleção, para exercer o "tudo ou nada" do
// carregamento.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::CatalogStore,
    models::catalogo::{ordenar_por_nome, Categoria, Insumo, NovoInsumo, Unidade},
};

#[derive(Default)]
struct Dados {
    insumos: Vec<Insumo>,
    categorias: Vec<Categoria>,
    unidades: Vec<Unidade>,
}

#[derive(Default)]
pub struct MemCatalogStore {
    dados: Mutex<Dados>,
    falhas: Mutex<HashSet<&'static str>>,
}

impl MemCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A partir daqui, toda operação sobre a coleção indicada falha com
    // StoreError.
    pub fn falhar_colecao(&self, colecao: &'static str) {
        self.falhas.lock().unwrap().insert(colecao);
    }

    pub fn com_categorias(self, nomes: &[&str]) -> Self {
        {
            let mut dados = self.dados.lock().unwrap();
            for nome in nomes {
                dados.categorias.push(Categoria {
                    id: Uuid::new_v4(),
                    nome: nome.to_string(),
                    created_at: Utc::now(),
                });
            }
        }
        self
    }

    pub fn com_unidades(self, nomes: &[&str]) -> Self {
        {
            let mut dados = self.dados.lock().unwrap();
            for nome in nomes {
                dados.unidades.push(Unidade {
                    id: Uuid::new_v4(),
                    nome: nome.to_string(),
                    created_at: Utc::now(),
                });
            }
        }
        self
    }

    pub fn com_insumos(self, insumos: &[NovoInsumo]) -> Self {
        {
            let mut dados = self.dados.lock().unwrap();
            for novo in insumos {
                dados.insumos.push(materializar_insumo(novo));
            }
        }
        self
    }

    fn checar_falha(&self, colecao: &'static str) -> Result<(), AppError> {
        if self.falhas.lock().unwrap().contains(colecao) {
            return Err(AppError::StoreError(format!(
                "falha simulada em '{colecao}'"
            )));
        }
        Ok(())
    }
}

fn materializar_insumo(novo: &NovoInsumo) -> Insumo {
    Insumo {
        id: Uuid::new_v4(),
        nome: novo.nome.clone(),
        unidade: novo.unidade.clone(),
        categoria: novo.categoria.clone(),
        preco: novo.preco,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl CatalogStore for MemCatalogStore {
    // --- Insumos ---

    async fn listar_insumos(&self) -> Result<Vec<Insumo>, AppError> {
        self.checar_falha("insumos")?;
        let mut insumos = self.dados.lock().unwrap().insumos.clone();
        ordenar_por_nome(&mut insumos);
        Ok(insumos)
    }

    async fn inserir_insumo(&self, novo: &NovoInsumo) -> Result<Insumo, AppError> {
        self.checar_falha("insumos")?;
        let insumo = materializar_insumo(novo);
        self.dados.lock().unwrap().insumos.push(insumo.clone());
        Ok(insumo)
    }

    async fn atualizar_insumo(&self, id: Uuid, dados: &NovoInsumo) -> Result<Insumo, AppError> {
        self.checar_falha("insumos")?;
        let mut guard = self.dados.lock().unwrap();
        let insumo = guard
            .insumos
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(AppError::NotFound)?;
        insumo.nome = dados.nome.clone();
        insumo.unidade = dados.unidade.clone();
        insumo.categoria = dados.categoria.clone();
        insumo.preco = dados.preco;
        Ok(insumo.clone())
    }

    async fn excluir_insumo(&self, id: Uuid) -> Result<(), AppError> {
        self.checar_falha("insumos")?;
        let mut guard = self.dados.lock().unwrap();
        let antes = guard.insumos.len();
        guard.insumos.retain(|i| i.id != id);
        if guard.insumos.len() == antes {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // --- Categorias ---

    async fn listar_categorias(&self) -> Result<Vec<Categoria>, AppError> {
        self.checar_falha("categorias")?;
        let mut categorias = self.dados.lock().unwrap().categorias.clone();
        ordenar_por_nome(&mut categorias);
        Ok(categorias)
    }

    async fn inserir_categoria(&self, nome: &str) -> Result<Categoria, AppError> {
        self.checar_falha("categorias")?;
        let mut guard = self.dados.lock().unwrap();
        if guard.categorias.iter().any(|c| c.nome == nome) {
            return Err(AppError::DuplicateName(nome.to_string()));
        }
        let categoria = Categoria {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            created_at: Utc::now(),
        };
        guard.categorias.push(categoria.clone());
        Ok(categoria)
    }

    async fn atualizar_categoria(&self, id: Uuid, nome: &str) -> Result<Categoria, AppError> {
        self.checar_falha("categorias")?;
        let mut guard = self.dados.lock().unwrap();
        if guard.categorias.iter().any(|c| c.nome == nome && c.id != id) {
            return Err(AppError::DuplicateName(nome.to_string()));
        }
        let categoria = guard
            .categorias
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound)?;
        categoria.nome = nome.to_string();
        Ok(categoria.clone())
    }

    async fn excluir_categoria(&self, id: Uuid) -> Result<(), AppError> {
        self.checar_falha("categorias")?;
        let mut guard = self.dados.lock().unwrap();
        let antes = guard.categorias.len();
        guard.categorias.retain(|c| c.id != id);
        if guard.categorias.len() == antes {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    // --- Unidades ---

    async fn listar_unidades(&self) -> Result<Vec<Unidade>, AppError> {
        self.checar_falha("unidades")?;
        let mut unidades = self.dados.lock().unwrap().unidades.clone();
        ordenar_por_nome(&mut unidades);
        Ok(unidades)
    }

    async fn inserir_unidade(&self, nome: &str) -> Result<Unidade, AppError> {
        self.checar_falha("unidades")?;
        let mut guard = self.dados.lock().unwrap();
        if guard.unidades.iter().any(|u| u.nome == nome) {
            return Err(AppError::DuplicateName(nome.to_string()));
        }
        let unidade = Unidade {
            id: Uuid::new_v4(),
            nome: nome.to_string(),
            created_at: Utc::now(),
        };
        guard.unidades.push(unidade.clone());
        Ok(unidade)
    }

    async fn atualizar_unidade(&self, id: Uuid, nome: &str) -> Result<Unidade, AppError> {
        self.checar_falha("unidades")?;
        let mut guard = self.dados.lock().unwrap();
        if guard.unidades.iter().any(|u| u.nome == nome && u.id != id) {
            return Err(AppError::DuplicateName(nome.to_string()));
        }
        let unidade = guard
            .unidades
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound)?;
        unidade.nome = nome.to_string();
        Ok(unidade.clone())
    }

    async fn excluir_unidade(&self, id: Uuid) -> Result<(), AppError> {
        self.checar_falha("unidades")?;
        let mut guard = self.dados.lock().unwrap();
        let antes = guard.unidades.len();
        guard.unidades.retain(|u| u.id != id);
        if guard.unidades.len() == antes {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
