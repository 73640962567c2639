//! Linking mapped items to their repair and maintenance codes.

use crosswalk_model::{CrosswalkMapping, NdisSupportItem};

use crate::index::ItemIndex;
use crate::similarity::TokenSet;

/// Repair items for `mapped`: other items of the same category whose name or
/// description contains one of `keywords` (already lowercased).
///
/// Ordered by name similarity to `mapped`, most similar first, ties by
/// lowest item code. An uncategorized item links nothing.
pub fn repair_items<'a>(
    mapped: &NdisSupportItem,
    index: &ItemIndex<'a>,
    keywords: &[String],
) -> Vec<&'a NdisSupportItem> {
    let Some(category) = mapped.category.as_deref() else {
        return Vec::new();
    };
    if keywords.is_empty() {
        return Vec::new();
    }
    let target = TokenSet::new(&mapped.item_name);
    let mut linked: Vec<(&'a NdisSupportItem, u8)> = index
        .in_category(category)
        .filter(|candidate| candidate.item.item_code != mapped.item_code)
        .filter(|candidate| mentions_repair(candidate.item, keywords))
        .map(|candidate| (candidate.item, target.ratio(&candidate.name)))
        .collect();
    linked.sort_by(|(a, a_score), (b, b_score)| {
        b_score
            .cmp(a_score)
            .then_with(|| a.item_code.cmp(&b.item_code))
    });
    linked.into_iter().map(|(item, _)| item).collect()
}

fn mentions_repair(item: &NdisSupportItem, keywords: &[String]) -> bool {
    let name = item.item_name.to_lowercase();
    let description = item.description_text().to_lowercase();
    keywords
        .iter()
        .any(|keyword| name.contains(keyword.as_str()) || description.contains(keyword.as_str()))
}

/// Replaces the repair links of `mapping`. Applying it twice gives the same
/// mapping as applying it once.
pub fn link_repairs(mapping: &mut CrosswalkMapping, index: &ItemIndex<'_>, keywords: &[String]) {
    mapping.repair_items = match mapping.matched_item.as_ref() {
        Some(item) => repair_items(item, index, keywords)
            .into_iter()
            .cloned()
            .collect(),
        None => Vec::new(),
    };
}
