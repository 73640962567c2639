//! Tests for crosswalk-model types.

use std::fs;

use crosswalk_model::{
    ConfidenceTier, ConfigError, CrosswalkConfig, CrosswalkMapping, EnableNswEntry,
    FuzzyThreshold, MatchMethod, NdisSupportItem, RuleSet,
};
use rust_decimal::Decimal;

#[test]
fn config_loads_from_toml_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("crosswalk.toml");
    fs::write(
        &path,
        r#"
fuzzy_threshold = 72
include_repair_codes = true
repair_keywords = ["Repair", "servicing"]

[mapping_rules]
version = "clinic-2"

[[mapping_rules.rules]]
name = "hoist"
keywords = ["hoist"]
target_ndis_category = "Transfer Aids"
"#,
    )
    .expect("write config");

    let config = CrosswalkConfig::load(&path).expect("load config");
    assert_eq!(config.fuzzy_threshold, FuzzyThreshold::new(72).unwrap());
    assert!(config.include_repair_codes);
    assert_eq!(config.normalized_repair_keywords(), vec!["repair", "servicing"]);
    assert_eq!(config.mapping_rules.version, "clinic-2");
    assert_eq!(config.mapping_rules.len(), 1);
}

#[test]
fn config_load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = CrosswalkConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn rule_file_with_lower_tier_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("rules.toml");
    fs::write(
        &path,
        r#"
[[rules]]
name = "kitchen"
keywords = ["kitchen"]
target_ndis_category = "Daily Living"
fixed_confidence_tier = "functional-equivalent"
"#,
    )
    .expect("write rules");

    let err = RuleSet::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::RuleTierBelowHigh {
            tier: ConfidenceTier::FunctionalEquivalent,
            ..
        }
    ));
}

#[test]
fn unit_price_serializes_as_string() {
    let item = NdisSupportItem::new("05_221336811_0113_1_2", "Manual wheelchair - standard")
        .with_category("Personal Mobility")
        .with_unit_price(Decimal::new(150000, 2));
    let json = serde_json::to_value(&item).expect("serialize item");
    assert_eq!(json["unit_price"], "1500.00");
    assert!(json.get("description").is_none());
}

#[test]
fn mapping_accessors() {
    let entry = EnableNswEntry::new("Personal Mobility", "Manual Wheelchairs", Some("  "));
    assert!(entry.description.is_none());

    let mut mapping = CrosswalkMapping::no_equivalent(entry);
    mapping.matched_item =
        Some(NdisSupportItem::new("05_1", "Manual wheelchair").with_category("Personal Mobility"));
    mapping.match_method = MatchMethod::RuleBased;
    mapping.confidence_tier = ConfidenceTier::High;
    mapping.repair_items = vec![NdisSupportItem::new("05_9", "Wheelchair repair")];

    assert!(mapping.is_mapped());
    assert_eq!(mapping.item_code(), Some("05_1"));
    assert_eq!(mapping.ndis_category(), Some("Personal Mobility"));
    assert_eq!(mapping.repair_codes(), vec!["05_9"]);
}
