//! Matching engine for the EnableNSW to NDIS crosswalk.
//!
//! Entries go through three stages:
//!
//! 1. [`rules`]: the first keyword rule that hits the entry selects an NDIS
//!    category, and the item in that category with the most similar name
//!    becomes a high-confidence match.
//! 2. [`fuzzy`]: otherwise the entry text is scored against every item and
//!    the best item reaching the threshold becomes a functional equivalent.
//! 3. [`repair`]: optionally, repair and maintenance items of the matched
//!    item's category are linked.
//!
//! [`run_crosswalk`] runs all entries and derives [`CrosswalkStats`].

pub mod confidence;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod repair;
pub mod rules;
pub mod similarity;
pub mod stats;

pub use confidence::classify;
pub use engine::{CrosswalkResult, map_entry, run_crosswalk};
pub use error::MatchError;
pub use index::ItemIndex;
pub use similarity::{TokenSet, clean_text, token_set_ratio};
pub use stats::{CategorySummary, CrosswalkStats, MethodCount, SkippedRows, TierCount};
