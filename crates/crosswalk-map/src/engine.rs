//! Crosswalk assembly.
//!
//! Each entry is classified independently: the rule stage runs first, the
//! fuzzy stage only when no rule produced an item, and repair links are
//! attached last when enabled. Entries are processed in parallel and the
//! output keeps input order.

use crosswalk_model::{
    ConfidenceTier, CrosswalkConfig, CrosswalkMapping, EnableNswEntry, MatchMethod,
    NdisSupportItem,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::Digest;
use tracing::{debug, info, warn};

use crate::confidence::classify;
use crate::error::MatchError;
use crate::fuzzy::fuzzy_match;
use crate::index::ItemIndex;
use crate::repair::link_repairs;
use crate::rules::match_rules;
use crate::similarity::TokenSet;
use crate::stats::{CrosswalkStats, SkippedRows};

/// Mappings of one run plus their statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosswalkResult {
    /// One mapping per input entry, in input order.
    pub mappings: Vec<CrosswalkMapping>,
    pub stats: CrosswalkStats,
}

impl CrosswalkResult {
    /// Records the rows ingestion dropped from each source.
    #[must_use]
    pub fn with_skipped_rows(mut self, enablensw: usize, ndis: usize) -> Self {
        self.stats.skipped_rows = SkippedRows { enablensw, ndis };
        self
    }

    /// SHA-256 (hex) of the canonical JSON form. Equal inputs give equal
    /// fingerprints.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(sha2::Sha256::digest(&bytes)))
    }
}

/// Maps every entry to at most one NDIS item.
///
/// The result depends only on the arguments. Per-entry failures are logged
/// and turn the entry into a review-required mapping with a note.
pub fn run_crosswalk(
    entries: &[EnableNswEntry],
    universe: &[NdisSupportItem],
    config: &CrosswalkConfig,
) -> CrosswalkResult {
    info!(
        entries = entries.len(),
        items = universe.len(),
        rules = config.mapping_rules.len(),
        rule_version = %config.mapping_rules.version,
        threshold = %config.fuzzy_threshold,
        repair_codes = config.include_repair_codes,
        "running crosswalk"
    );
    let index = ItemIndex::new(universe);
    let repair_keywords = config.normalized_repair_keywords();

    let mappings: Vec<CrosswalkMapping> = entries
        .par_iter()
        .map(|entry| {
            match map_entry(entry, &index, config) {
                Ok(mut mapping) => {
                    if config.include_repair_codes {
                        link_repairs(&mut mapping, &index, &repair_keywords);
                    }
                    mapping
                }
                Err(err) => {
                    warn!(
                        category = %entry.category,
                        subcategory = %entry.subcategory,
                        error = %err,
                        "entry downgraded to review"
                    );
                    CrosswalkMapping::no_equivalent(entry.clone()).with_note(err.to_string())
                }
            }
        })
        .collect();

    let stats = CrosswalkStats::from_mappings(&mappings);
    info!(
        mapped = stats.mapped,
        unmatched = stats.unmatched,
        high = stats.tier_count(ConfidenceTier::High),
        functional_equivalent = stats.tier_count(ConfidenceTier::FunctionalEquivalent),
        review_required = stats.tier_count(ConfidenceTier::ReviewRequired),
        "crosswalk complete"
    );
    CrosswalkResult { mappings, stats }
}

/// Classifies a single entry against an indexed universe.
pub fn map_entry(
    entry: &EnableNswEntry,
    index: &ItemIndex<'_>,
    config: &CrosswalkConfig,
) -> Result<CrosswalkMapping, MatchError> {
    let query = TokenSet::new(&entry.composite_text());
    if query.is_empty() {
        return Err(MatchError::EmptyEntry {
            category: entry.category.clone(),
            subcategory: entry.subcategory.clone(),
        });
    }
    let threshold = config.fuzzy_threshold;

    if let Some(hit) = match_rules(entry, &config.mapping_rules, index) {
        debug!(
            subcategory = %entry.subcategory,
            rule = %hit.rule.name,
            item = %hit.item.item_code,
            "rule-based match"
        );
        return Ok(CrosswalkMapping {
            matched_item: Some(hit.item.clone()),
            match_method: MatchMethod::RuleBased,
            similarity_score: None,
            confidence_tier: classify(MatchMethod::RuleBased, None, threshold),
            matched_rule: Some(hit.rule.name.clone()),
            keywords_matched: hit.keywords,
            ..CrosswalkMapping::no_equivalent(entry.clone())
        });
    }

    match fuzzy_match(&query, index, threshold) {
        Some(candidate) => {
            debug!(
                subcategory = %entry.subcategory,
                item = %candidate.item.item_code,
                score = candidate.score,
                "fuzzy match"
            );
            Ok(CrosswalkMapping {
                matched_item: Some(candidate.item.clone()),
                match_method: MatchMethod::Fuzzy,
                similarity_score: Some(candidate.score),
                confidence_tier: classify(MatchMethod::Fuzzy, Some(candidate.score), threshold),
                ..CrosswalkMapping::no_equivalent(entry.clone())
            })
        }
        None => {
            debug!(subcategory = %entry.subcategory, "no clear equivalent");
            Ok(CrosswalkMapping::no_equivalent(entry.clone()))
        }
    }
}
