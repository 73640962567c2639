//! Confidence tier assignment.

use crosswalk_model::{ConfidenceTier, FuzzyThreshold, MatchMethod};

/// Tier for a match outcome.
///
/// Rule-based matches are always high. Fuzzy matches are functional
/// equivalents when their score reaches the threshold and need review
/// otherwise. No match needs review.
pub fn classify(method: MatchMethod, score: Option<u8>, threshold: FuzzyThreshold) -> ConfidenceTier {
    match method {
        MatchMethod::RuleBased => ConfidenceTier::High,
        MatchMethod::Fuzzy => match score {
            Some(score) if threshold.accepts(score) => ConfidenceTier::FunctionalEquivalent,
            _ => ConfidenceTier::ReviewRequired,
        },
        MatchMethod::None => ConfidenceTier::ReviewRequired,
    }
}
