//! Read-only lookup structures over the NDIS universe, built once per run.

use std::collections::BTreeMap;

use crosswalk_model::{NdisSupportItem, fold_key};

use crate::similarity::TokenSet;

/// An NDIS item together with its precomputed token sets.
#[derive(Debug)]
pub struct IndexedItem<'a> {
    pub item: &'a NdisSupportItem,
    /// Tokens of the item name.
    pub name: TokenSet,
    /// Tokens of the item name plus description.
    pub text: TokenSet,
}

/// The universe indexed by category.
#[derive(Debug)]
pub struct ItemIndex<'a> {
    items: Vec<IndexedItem<'a>>,
    by_category: BTreeMap<String, Vec<usize>>,
}

impl<'a> ItemIndex<'a> {
    pub fn new(universe: &'a [NdisSupportItem]) -> Self {
        let mut by_category: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let items = universe
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if let Some(category) = item.category.as_deref() {
                    by_category.entry(fold_key(category)).or_default().push(idx);
                }
                IndexedItem {
                    item,
                    name: TokenSet::new(&item.item_name),
                    text: TokenSet::new(&item.composite_text()),
                }
            })
            .collect();
        Self { items, by_category }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexedItem<'a>> {
        self.items.iter()
    }

    /// Items whose category equals `category` under [`fold_key`], in
    /// universe order.
    pub fn in_category<'s>(
        &'s self,
        category: &str,
    ) -> impl Iterator<Item = &'s IndexedItem<'a>> + use<'s, 'a> {
        self.by_category
            .get(&fold_key(category))
            .into_iter()
            .flatten()
            .map(|&idx| &self.items[idx])
    }
}

/// Keeps the candidate with the higher score, ties going to the lower item
/// code.
pub(crate) fn prefer<'a>(
    best: Option<(&'a NdisSupportItem, u8)>,
    item: &'a NdisSupportItem,
    score: u8,
) -> Option<(&'a NdisSupportItem, u8)> {
    match best {
        Some((current, current_score))
            if current_score > score
                || (current_score == score && current.item_code <= item.item_code) =>
        {
            Some((current, current_score))
        }
        _ => Some((item, score)),
    }
}
