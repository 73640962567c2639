pub mod entry;
pub mod enums;
pub mod error;
pub mod item;
pub mod lookup;
pub mod mapping;
pub mod options;
pub mod rule;

pub use entry::EnableNswEntry;
pub use enums::{ConfidenceTier, MatchMethod};
pub use error::{ConfigError, Result};
pub use item::NdisSupportItem;
pub use lookup::fold_key;
pub use mapping::CrosswalkMapping;
pub use options::{CrosswalkConfig, DEFAULT_REPAIR_KEYWORDS, FuzzyThreshold};
pub use rule::{DEFAULT_RULESET_VERSION, MappingRule, RuleSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_mapping_is_review_required() {
        let entry = EnableNswEntry::new("Vision", "Screen readers", None);
        let mapping = CrosswalkMapping::no_equivalent(entry);
        assert_eq!(mapping.match_method, MatchMethod::None);
        assert_eq!(mapping.confidence_tier, ConfidenceTier::ReviewRequired);
        assert!(mapping.matched_item.is_none());
        assert!(mapping.similarity_score.is_none());
        assert!(!mapping.is_mapped());
    }

    #[test]
    fn mapping_serializes() {
        let entry = EnableNswEntry::new("Vision", "Magnifiers", Some("Hand held"));
        let mapping = CrosswalkMapping::no_equivalent(entry);
        let json = serde_json::to_string(&mapping).expect("serialize mapping");
        assert!(json.contains("\"match_method\":\"none\""));
        assert!(json.contains("\"confidence_tier\":\"review-required\""));
        let round: CrosswalkMapping = serde_json::from_str(&json).expect("deserialize mapping");
        assert_eq!(round, mapping);
    }
}
