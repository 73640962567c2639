//! Approximate matching against the whole universe.

use crosswalk_model::{FuzzyThreshold, NdisSupportItem};
use tracing::trace;

use crate::index::{ItemIndex, prefer};
use crate::similarity::TokenSet;

/// Highest-scoring item for a query, whether or not it passes the threshold.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyCandidate<'a> {
    pub item: &'a NdisSupportItem,
    pub score: u8,
}

impl FuzzyCandidate<'_> {
    pub fn accepted_by(&self, threshold: FuzzyThreshold) -> bool {
        threshold.accepts(self.score)
    }
}

/// Scores every item's name and description against `query`.
///
/// Ties go to the lowest item code. Returns `None` only for an empty
/// universe or an empty query.
pub fn best_candidate<'a>(query: &TokenSet, index: &ItemIndex<'a>) -> Option<FuzzyCandidate<'a>> {
    if query.is_empty() {
        return None;
    }
    index
        .iter()
        .fold(None, |best, candidate| {
            prefer(best, candidate.item, query.ratio(&candidate.text))
        })
        .map(|(item, score)| FuzzyCandidate { item, score })
}

/// The best candidate for `query` if it reaches `threshold`.
pub fn fuzzy_match<'a>(
    query: &TokenSet,
    index: &ItemIndex<'a>,
    threshold: FuzzyThreshold,
) -> Option<FuzzyCandidate<'a>> {
    let best = best_candidate(query, index)?;
    if best.accepted_by(threshold) {
        Some(best)
    } else {
        trace!(
            item = %best.item.item_code,
            score = best.score,
            threshold = threshold.value(),
            "best candidate below threshold"
        );
        None
    }
}
