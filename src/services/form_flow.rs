// src/services/form_flow.rs
//
// O fluxo de edição do formulário de insumo, modelado como uma máquina
// de estados explícita em vez de flags soltas: enquanto o usuário edita
// um insumo, ele pode pedir a criação inline de uma categoria ou
// unidade; o rascunho em andamento é guardado, a sub-entidade é criada
// e o rascunho volta com o campo certo já preenchido. Cancelar a
// criação inline devolve o rascunho intacto.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::{validation_error, AppError};
use crate::models::catalogo::Sugestao;

// O rascunho do formulário. `alvo` presente significa edição de um
// insumo existente; ausente, criação de um novo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RascunhoInsumo {
    #[serde(default)]
    pub alvo: Option<Uuid>,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub unidade: String,
    #[serde(default)]
    pub preco: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoSubEntidade {
    Categoria,
    Unidade,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "estado", rename_all = "camelCase")]
pub enum FormFlow {
    #[default]
    Ocioso,
    EditandoInsumo {
        rascunho: RascunhoInsumo,
    },
    EditandoSubEntidade {
        rascunho: RascunhoInsumo,
        tipo: TipoSubEntidade,
    },
}

impl FormFlow {
    fn transicao_invalida(mensagem: &'static str) -> AppError {
        validation_error("formulario", "estado_invalido", mensagem)
    }

    // Abrir o formulário vale de qualquer estado: descarta o que havia.
    pub fn abrir(&mut self, rascunho: RascunhoInsumo) {
        *self = FormFlow::EditandoInsumo { rascunho };
    }

    pub fn fechar(&mut self) {
        *self = FormFlow::Ocioso;
    }

    pub fn rascunho(&self) -> Option<&RascunhoInsumo> {
        match self {
            FormFlow::Ocioso => None,
            FormFlow::EditandoInsumo { rascunho }
            | FormFlow::EditandoSubEntidade { rascunho, .. } => Some(rascunho),
        }
    }

    pub fn tipo_sub_entidade(&self) -> Option<TipoSubEntidade> {
        match self {
            FormFlow::EditandoSubEntidade { tipo, .. } => Some(*tipo),
            _ => None,
        }
    }

    // Teclas do formulário: só faz sentido enquanto o insumo está em
    // edição direta.
    pub fn atualizar(&mut self, rascunho: RascunhoInsumo) -> Result<(), AppError> {
        match self {
            FormFlow::EditandoInsumo { .. } => {
                *self = FormFlow::EditandoInsumo { rascunho };
                Ok(())
            }
            _ => Err(Self::transicao_invalida(
                "Nenhum insumo em edição para atualizar.",
            )),
        }
    }

    // Suspende o formulário do insumo guardando o rascunho e passa para
    // a criação da sub-entidade.
    pub fn solicitar_sub_entidade(&mut self, tipo: TipoSubEntidade) -> Result<(), AppError> {
        match std::mem::take(self) {
            FormFlow::EditandoInsumo { rascunho } => {
                *self = FormFlow::EditandoSubEntidade { rascunho, tipo };
                Ok(())
            }
            anterior => {
                *self = anterior;
                Err(Self::transicao_invalida(
                    "É preciso estar editando um insumo para criar categoria ou unidade inline.",
                ))
            }
        }
    }

    // A sub-entidade foi criada: retoma o rascunho com o novo nome
    // pré-preenchido no campo correspondente.
    pub fn concluir_sub_entidade(&mut self, nome: &str) -> Result<(), AppError> {
        match std::mem::take(self) {
            FormFlow::EditandoSubEntidade { mut rascunho, tipo } => {
                match tipo {
                    TipoSubEntidade::Categoria => rascunho.categoria = nome.to_string(),
                    TipoSubEntidade::Unidade => rascunho.unidade = nome.to_string(),
                }
                *self = FormFlow::EditandoInsumo { rascunho };
                Ok(())
            }
            anterior => {
                *self = anterior;
                Err(Self::transicao_invalida(
                    "Nenhuma criação inline em andamento para concluir.",
                ))
            }
        }
    }

    // Cancelar devolve o rascunho exatamente como estava.
    pub fn cancelar_sub_entidade(&mut self) -> Result<(), AppError> {
        match std::mem::take(self) {
            FormFlow::EditandoSubEntidade { rascunho, .. } => {
                *self = FormFlow::EditandoInsumo { rascunho };
                Ok(())
            }
            anterior => {
                *self = anterior;
                Err(Self::transicao_invalida(
                    "Nenhuma criação inline em andamento para cancelar.",
                ))
            }
        }
    }

    // A sugestão é consultiva: preenche só os campos que ainda estão em
    // branco e nunca submete nada.
    pub fn aplicar_sugestao(&mut self, sugestao: &Sugestao) -> Result<(), AppError> {
        match self {
            FormFlow::EditandoInsumo { rascunho } => {
                if rascunho.categoria.trim().is_empty() {
                    rascunho.categoria = sugestao.categoria.clone();
                }
                if rascunho.unidade.trim().is_empty() {
                    rascunho.unidade = sugestao.unidade.clone();
                }
                Ok(())
            }
            _ => Err(Self::transicao_invalida(
                "Nenhum insumo em edição para receber a sugestão.",
            )),
        }
    }
}
