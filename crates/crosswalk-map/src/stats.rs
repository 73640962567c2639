//! Summary statistics over a finished crosswalk.

use std::collections::{BTreeMap, BTreeSet};

use crosswalk_model::{ConfidenceTier, CrosswalkMapping, MatchMethod};
use serde::{Deserialize, Serialize};

/// Count and share of one confidence tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCount {
    pub tier: ConfidenceTier,
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

/// Count and share of one match method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCount {
    pub method: MatchMethod,
    pub count: usize,
    pub percent: f64,
}

/// Pivot row for one EnableNSW category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: usize,
    pub mapped: usize,
    pub success_rate: f64,
    /// Distinct NDIS categories reached, sorted.
    pub ndis_categories: Vec<String>,
    pub high: usize,
    pub functional_equivalent: usize,
    pub review_required: usize,
}

/// Rows dropped during ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRows {
    pub enablensw: usize,
    pub ndis: usize,
}

/// Statistics derived from the mappings of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosswalkStats {
    pub total_entries: usize,
    pub mapped: usize,
    pub unmatched: usize,
    pub match_rate: f64,
    /// Every tier, in tier order, including empty ones.
    pub by_tier: Vec<TierCount>,
    /// Every match method, including empty ones.
    pub by_method: Vec<MethodCount>,
    /// One row per EnableNSW category, sorted by category.
    pub by_category: Vec<CategorySummary>,
    pub skipped_rows: SkippedRows,
}

impl CrosswalkStats {
    pub fn from_mappings(mappings: &[CrosswalkMapping]) -> Self {
        let total = mappings.len();
        let mapped = mappings.iter().filter(|m| m.is_mapped()).count();

        let by_tier = ConfidenceTier::ALL
            .iter()
            .map(|&tier| {
                let count = mappings.iter().filter(|m| m.confidence_tier == tier).count();
                TierCount {
                    tier,
                    label: tier.label().to_string(),
                    count,
                    percent: percent(count, total),
                }
            })
            .collect();

        let by_method = MatchMethod::ALL
            .iter()
            .map(|&method| {
                let count = mappings.iter().filter(|m| m.match_method == method).count();
                MethodCount {
                    method,
                    count,
                    percent: percent(count, total),
                }
            })
            .collect();

        let mut groups: BTreeMap<&str, Vec<&CrosswalkMapping>> = BTreeMap::new();
        for mapping in mappings {
            groups
                .entry(mapping.entry.category.as_str())
                .or_default()
                .push(mapping);
        }
        let by_category = groups
            .into_iter()
            .map(|(category, rows)| category_summary(category, &rows))
            .collect();

        Self {
            total_entries: total,
            mapped,
            unmatched: total - mapped,
            match_rate: percent(mapped, total),
            by_tier,
            by_method,
            by_category,
            skipped_rows: SkippedRows::default(),
        }
    }

    pub fn tier_count(&self, tier: ConfidenceTier) -> usize {
        self.by_tier
            .iter()
            .find(|row| row.tier == tier)
            .map_or(0, |row| row.count)
    }

    pub fn method_count(&self, method: MatchMethod) -> usize {
        self.by_method
            .iter()
            .find(|row| row.method == method)
            .map_or(0, |row| row.count)
    }
}

fn category_summary(category: &str, rows: &[&CrosswalkMapping]) -> CategorySummary {
    let total = rows.len();
    let mapped = rows.iter().filter(|m| m.is_mapped()).count();
    let ndis_categories: BTreeSet<&str> = rows.iter().filter_map(|m| m.ndis_category()).collect();
    let count_tier = |tier: ConfidenceTier| rows.iter().filter(|m| m.confidence_tier == tier).count();
    CategorySummary {
        category: category.to_string(),
        total,
        mapped,
        success_rate: percent(mapped, total),
        ndis_categories: ndis_categories.into_iter().map(str::to_string).collect(),
        high: count_tier(ConfidenceTier::High),
        functional_equivalent: count_tier(ConfidenceTier::FunctionalEquivalent),
        review_required: count_tier(ConfidenceTier::ReviewRequired),
    }
}

/// Share of `count` in `total` as a percentage with two decimals.
fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 10_000.0 / total as f64).round() / 100.0
}
