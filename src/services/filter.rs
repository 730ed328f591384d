// src/services/filter.rs
//
// O motor de busca é só isto: funções puras sobre as coleções em
// memória. A visão filtrada é derivada a cada requisição, nunca vira
// uma segunda fonte de verdade.

use crate::models::catalogo::{Insumo, NomeRef};

// Insumos casam pelo nome OU pela categoria (substring, sem diferenciar
// maiúsculas de minúsculas). Termo vazio devolve a coleção inteira, na
// ordem original.
pub fn filtrar_insumos(termo: &str, insumos: &[Insumo]) -> Vec<Insumo> {
    let termo = termo.trim().to_lowercase();
    if termo.is_empty() {
        return insumos.to_vec();
    }
    insumos
        .iter()
        .filter(|insumo| {
            insumo.nome.to_lowercase().contains(&termo)
                || insumo.categoria.to_lowercase().contains(&termo)
        })
        .cloned()
        .collect()
}

// Categorias e unidades casam só pelo nome.
pub fn filtrar_por_nome<T: NomeRef + Clone>(termo: &str, itens: &[T]) -> Vec<T> {
    let termo = termo.trim().to_lowercase();
    if termo.is_empty() {
        return itens.to_vec();
    }
    itens
        .iter()
        .filter(|item| item.nome().to_lowercase().contains(&termo))
        .cloned()
        .collect()
}
