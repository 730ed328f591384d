// src/models/pedidos.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::catalogo::Insumo;

// Um insumo do catálogo com a quantidade que está no carrinho (0 se não
// estiver). A listagem de pedidos mostra o catálogo INTEIRO, não só o que
// já foi selecionado.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPedido {
    #[serde(flatten)]
    pub insumo: Insumo,
    pub quantidade: u32,
}

// Agrupamento por categoria para exibição. `itens_no_carrinho` conta
// quantos insumos do grupo já têm quantidade > 0, para destaque na UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrupoCategoria {
    pub categoria: String,
    pub insumos: Vec<ItemPedido>,
    pub itens_no_carrinho: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinhaCarrinho {
    pub insumo: Insumo,
    pub quantidade: u32,
    pub subtotal: Decimal,
}

// O resumo do carrinho. `total` já vem arredondado para 2 casas: o
// acúmulo interno é feito em precisão cheia e arredondado uma única vez.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoCarrinho {
    pub itens: Vec<LinhaCarrinho>,
    pub total: Decimal,
    pub total_itens: u64,
}
