//! Error types for matching.

use thiserror::Error;

/// A failure confined to one entry. The engine never aborts on it; the
/// entry is downgraded to review-required instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Nothing of the entry survives text cleaning.
    #[error("entry has no matchable text (category '{category}', subcategory '{subcategory}')")]
    EmptyEntry {
        category: String,
        subcategory: String,
    },
}
