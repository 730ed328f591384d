// src/services/cart_service.rs

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::catalogo::Insumo;
use crate::models::pedidos::{GrupoCategoria, ItemPedido, LinhaCarrinho, ResumoCarrinho};
use crate::services::filter::filtrar_por_nome;

// O carrinho é transitório e vive só no processo: um mapa de id do
// insumo para a quantidade escolhida. Entrada com quantidade zero
// equivale a ausência e nunca é armazenada.
#[derive(Clone, Default)]
pub struct CartService {
    itens: Arc<RwLock<HashMap<Uuid, u32>>>,
}

impl CartService {
    pub fn new() -> Self {
        Self::default()
    }

    // Zero remove; maior que zero insere ou substitui. Não há limite
    // superior.
    pub async fn definir_quantidade(&self, insumo_id: Uuid, quantidade: u32) {
        let mut itens = self.itens.write().await;
        if quantidade == 0 {
            itens.remove(&insumo_id);
        } else {
            itens.insert(insumo_id, quantidade);
        }
    }

    // Pares (id, quantidade) sem ordem garantida; quem exibe re-deriva a
    // ordem que precisar.
    pub async fn entradas(&self) -> Vec<(Uuid, u32)> {
        self.itens.read().await.iter().map(|(k, v)| (*k, *v)).collect()
    }

    pub async fn limpar(&self) {
        self.itens.write().await.clear();
    }

    // Junta as quantidades com o snapshot do catálogo. O total acumula
    // em precisão cheia e só arredonda para 2 casas na saída. Entradas
    // cujo insumo sumiu do catálogo são ignoradas.
    pub async fn resumo(&self, insumos: &[Insumo]) -> ResumoCarrinho {
        let itens = self.itens.read().await;
        let mut linhas = Vec::new();
        let mut total = Decimal::ZERO;
        let mut total_itens: u64 = 0;

        for insumo in insumos {
            let Some(&quantidade) = itens.get(&insumo.id) else {
                continue;
            };
            let subtotal = insumo.preco * Decimal::from(quantidade);
            total += subtotal;
            total_itens += u64::from(quantidade);
            linhas.push(LinhaCarrinho {
                insumo: insumo.clone(),
                quantidade,
                subtotal: subtotal.round_dp(2),
            });
        }

        ResumoCarrinho {
            itens: linhas,
            total: total.round_dp(2),
            total_itens,
        }
    }

    // Particiona o catálogo INTEIRO (filtrado pelo termo de busca, que
    // aqui casa só pelo nome) por categoria, independente de estar no
    // carrinho, e sobrepõe a quantidade escolhida em cada item.
    pub async fn agrupar_por_categoria(
        &self,
        termo: &str,
        insumos: &[Insumo],
    ) -> Vec<GrupoCategoria> {
        let itens = self.itens.read().await;
        let mut grupos: BTreeMap<String, Vec<ItemPedido>> = BTreeMap::new();

        for insumo in filtrar_por_nome(termo, insumos) {
            let quantidade = itens.get(&insumo.id).copied().unwrap_or(0);
            grupos
                .entry(insumo.categoria.clone())
                .or_default()
                .push(ItemPedido { insumo, quantidade });
        }

        grupos
            .into_iter()
            .map(|(categoria, insumos)| {
                let itens_no_carrinho = insumos.iter().filter(|i| i.quantidade > 0).count();
                GrupoCategoria {
                    categoria,
                    insumos,
                    itens_no_carrinho,
                }
            })
            .collect()
    }
}
