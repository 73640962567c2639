/// Folds a header or category name into a comparison key.
///
/// Lowercases, treats `_` and `-` as spaces and collapses runs of whitespace,
/// so `Support_Item_Number`, `support item number` and ` Support-Item  Number`
/// share one key.
pub fn fold_key(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
