//! Behavioral tests for the crosswalk engine.

use crosswalk_map::fuzzy::best_candidate;
use crosswalk_map::{ItemIndex, TokenSet, run_crosswalk};
use crosswalk_model::{
    ConfidenceTier, CrosswalkConfig, EnableNswEntry, FuzzyThreshold, MatchMethod, NdisSupportItem,
};
use proptest::prelude::*;

fn universe() -> Vec<NdisSupportItem> {
    vec![
        NdisSupportItem::new("05_122203111_0103_1_2", "Manual wheelchair")
            .with_category("Personal Mobility")
            .with_description("Self-propelled folding wheelchair"),
        NdisSupportItem::new("05_122203111_0103_1_3", "Wheelchair repair")
            .with_category("Personal Mobility"),
        NdisSupportItem::new("03_091203111_0103_1_1", "Over toilet frame")
            .with_category("Daily Living"),
        NdisSupportItem::new("06_242403111_0103_1_1", "Portable ramp")
            .with_category("Home Modifications"),
        NdisSupportItem::new("15_222103111_0103_1_1", "Hoist sling")
            .with_category("Transfer Aids"),
    ]
}

fn entries() -> Vec<EnableNswEntry> {
    vec![
        EnableNswEntry::new("Mobility", "Manual wheelchairs", Some("Standard folding")),
        EnableNswEntry::new("Home access", "Portable ramp", None),
        EnableNswEntry::new("Environmental control", "Door openers", None),
        EnableNswEntry::new("Transfers", "Hoist slings", None),
    ]
}

#[test]
fn manual_wheelchair_is_a_high_confidence_rule_match() {
    let items = universe();
    let entries = vec![EnableNswEntry::new("Mobility", "Manual wheelchairs", None)];
    let result = run_crosswalk(&entries, &items, &CrosswalkConfig::default());
    let mapping = &result.mappings[0];
    assert_eq!(mapping.match_method, MatchMethod::RuleBased);
    assert_eq!(mapping.confidence_tier, ConfidenceTier::High);
    assert_eq!(mapping.item_code(), Some("05_122203111_0103_1_2"));
    assert_eq!(mapping.ndis_category(), Some("Personal Mobility"));
    assert_eq!(mapping.matched_rule.as_deref(), Some("manual wheelchair"));
    assert!(mapping.similarity_score.is_none());
}

#[test]
fn unrelated_entry_has_no_clear_equivalent() {
    let items = universe();
    let entry = EnableNswEntry::new("Environmental control", "Door openers", None);
    let index = ItemIndex::new(&items);
    let best = best_candidate(&TokenSet::new(&entry.composite_text()), &index).expect("candidate");
    assert!(best.score < 80, "best score {}", best.score);

    let result = run_crosswalk(&[entry], &items, &CrosswalkConfig::default());
    let mapping = &result.mappings[0];
    assert_eq!(mapping.match_method, MatchMethod::None);
    assert_eq!(mapping.confidence_tier, ConfidenceTier::ReviewRequired);
    assert!(mapping.matched_item.is_none());
    assert!(mapping.similarity_score.is_none());
    assert_eq!(result.stats.unmatched, 1);
}

#[test]
fn fuzzy_match_is_a_functional_equivalent() {
    let items = universe();
    let entries = vec![EnableNswEntry::new("Home access", "Portable ramp", None)];
    let result = run_crosswalk(&entries, &items, &CrosswalkConfig::default());
    let mapping = &result.mappings[0];
    assert_eq!(mapping.match_method, MatchMethod::Fuzzy);
    assert_eq!(mapping.confidence_tier, ConfidenceTier::FunctionalEquivalent);
    assert_eq!(mapping.item_code(), Some("06_242403111_0103_1_1"));
    assert!(mapping.similarity_score.is_some_and(|score| score >= 80));
}

#[test]
fn rule_with_empty_category_falls_back_to_fuzzy() {
    let items = vec![
        NdisSupportItem::new("05_1", "Walking frame with wheels").with_category("Mobility Aids"),
    ];
    let entries = vec![EnableNswEntry::new("Walking", "Walking frame", None)];
    let result = run_crosswalk(&entries, &items, &CrosswalkConfig::default());
    let mapping = &result.mappings[0];
    assert_eq!(mapping.match_method, MatchMethod::Fuzzy);
    assert_eq!(mapping.item_code(), Some("05_1"));
}

#[test]
fn repeated_runs_share_a_fingerprint() {
    let items = universe();
    let entries = entries();
    let config = CrosswalkConfig::default().with_repair_codes(true);
    let first = run_crosswalk(&entries, &items, &config);
    let second = run_crosswalk(&entries, &items, &config);
    assert_eq!(first, second);
    assert_eq!(
        first.fingerprint().expect("fingerprint"),
        second.fingerprint().expect("fingerprint")
    );

    let stricter = run_crosswalk(&entries, &items, &config.clone().with_threshold(
        FuzzyThreshold::new(95).expect("threshold"),
    ));
    assert_eq!(first.mappings.len(), stricter.mappings.len());
}

#[test]
fn per_category_statistics_cover_every_entry() {
    let items = universe();
    let entries = entries();
    let result = run_crosswalk(&entries, &items, &CrosswalkConfig::default());
    let total: usize = result.stats.by_category.iter().map(|row| row.total).sum();
    assert_eq!(total, entries.len());
    let tiers: usize = result.stats.by_tier.iter().map(|row| row.count).sum();
    assert_eq!(tiers, entries.len());
    let methods: usize = result.stats.by_method.iter().map(|row| row.count).sum();
    assert_eq!(methods, entries.len());
}

fn entry_strategy() -> impl Strategy<Value = EnableNswEntry> {
    let words = prop::sample::select(vec![
        "wheelchair", "manual", "ramp", "portable", "hoist", "sling", "door", "frame", "toilet",
        "vision", "bath", "cushion", "switch", "bed", "rail",
    ]);
    (
        prop::collection::vec(words.clone(), 1..3),
        prop::collection::vec(words, 1..4),
    )
        .prop_map(|(category, subcategory)| {
            EnableNswEntry::new(category.join(" "), subcategory.join(" "), None)
        })
}

/// `universe()` plus several repair items per category, so linking has ties
/// to order.
fn universe_with_repairs() -> Vec<NdisSupportItem> {
    let mut items = universe();
    items.extend([
        NdisSupportItem::new("05_122203111_0103_1_4", "Wheelchair maintenance")
            .with_category("Personal Mobility"),
        NdisSupportItem::new("05_122203111_0103_1_5", "Wheelchair tyre repair")
            .with_category("Personal Mobility"),
        NdisSupportItem::new("15_222103111_0103_1_2", "Hoist repair")
            .with_category("Transfer Aids"),
        NdisSupportItem::new("15_222103111_0103_1_3", "Sling maintenance")
            .with_category("Transfer Aids"),
        NdisSupportItem::new("06_242403111_0103_1_2", "Ramp repair")
            .with_category("Home Modifications"),
    ]);
    items
}

fn described_entry_strategy() -> impl Strategy<Value = EnableNswEntry> {
    (
        entry_strategy(),
        prop::option::of("[a-z]{3,8}( [a-z]{3,8}){0,3}"),
    )
        .prop_map(|(entry, description)| {
            EnableNswEntry::new(entry.category, entry.subcategory, description.as_deref())
        })
}

proptest! {
    #[test]
    fn runs_with_repair_linking_share_a_fingerprint(
        entries in prop::collection::vec(described_entry_strategy(), 0..25),
        threshold in 60u8..=95,
    ) {
        let items = universe_with_repairs();
        let config = CrosswalkConfig::default()
            .with_threshold(FuzzyThreshold::new(threshold).expect("threshold"))
            .with_repair_codes(true);
        let first = run_crosswalk(&entries, &items, &config);
        let second = run_crosswalk(&entries, &items, &config);
        prop_assert_eq!(
            first.fingerprint().expect("fingerprint"),
            second.fingerprint().expect("fingerprint")
        );
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_entry_yields_one_mapping_in_order(entries in prop::collection::vec(entry_strategy(), 0..20)) {
        let items = universe();
        let result = run_crosswalk(&entries, &items, &CrosswalkConfig::default());
        prop_assert_eq!(result.mappings.len(), entries.len());
        for (mapping, entry) in result.mappings.iter().zip(&entries) {
            prop_assert_eq!(&mapping.entry, entry);
            if let Some(item) = &mapping.matched_item {
                prop_assert!(items.contains(item));
            }
        }
    }

    #[test]
    fn raising_the_threshold_never_improves_a_tier(
        entries in prop::collection::vec(entry_strategy(), 1..10),
        low in 60u8..=95,
        high in 60u8..=95,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let items = universe();
        let lenient = CrosswalkConfig::default()
            .with_threshold(FuzzyThreshold::new(low).expect("threshold"));
        let strict = CrosswalkConfig::default()
            .with_threshold(FuzzyThreshold::new(high).expect("threshold"));
        let lenient = run_crosswalk(&entries, &items, &lenient);
        let strict = run_crosswalk(&entries, &items, &strict);
        for (a, b) in lenient.mappings.iter().zip(&strict.mappings) {
            // tiers order from High to ReviewRequired
            prop_assert!(a.confidence_tier <= b.confidence_tier);
        }
    }

    #[test]
    fn fuzzy_acceptance_follows_the_threshold(
        entry in entry_strategy(),
        threshold in 60u8..=95,
    ) {
        let items = universe();
        let config = CrosswalkConfig::default()
            .with_threshold(FuzzyThreshold::new(threshold).expect("threshold"));
        let result = run_crosswalk(std::slice::from_ref(&entry), &items, &config);
        let mapping = &result.mappings[0];
        if mapping.match_method != MatchMethod::RuleBased {
            let index = ItemIndex::new(&items);
            let best = best_candidate(&TokenSet::new(&entry.composite_text()), &index);
            let expect_match = best.is_some_and(|candidate| candidate.score >= threshold);
            prop_assert_eq!(mapping.match_method == MatchMethod::Fuzzy, expect_match);
            if expect_match {
                prop_assert_eq!(mapping.similarity_score, best.map(|candidate| candidate.score));
                prop_assert_eq!(mapping.confidence_tier, ConfidenceTier::FunctionalEquivalent);
            } else {
                prop_assert_eq!(mapping.confidence_tier, ConfidenceTier::ReviewRequired);
            }
        }
    }
}
