//! Keyword rule matching.

use crosswalk_model::{EnableNswEntry, MappingRule, NdisSupportItem, RuleSet};
use tracing::debug;

use crate::index::{ItemIndex, prefer};
use crate::similarity::TokenSet;

/// The first rule whose keywords hit an entry.
#[derive(Debug, Clone)]
pub struct RuleHit<'r> {
    pub rule: &'r MappingRule,
    /// Rule keywords found in the entry, in declaration order.
    pub keywords: Vec<String>,
}

/// A rule hit resolved to a concrete NDIS item.
#[derive(Debug, Clone)]
pub struct RuleMatch<'r, 'a> {
    pub rule: &'r MappingRule,
    pub keywords: Vec<String>,
    pub item: &'a NdisSupportItem,
}

/// Keywords of `rule` that occur, case-insensitively, as substrings of the
/// entry's category, subcategory or description.
pub fn matched_keywords(entry: &EnableNswEntry, rule: &MappingRule) -> Vec<String> {
    let fields = [
        entry.category.to_lowercase(),
        entry.subcategory.to_lowercase(),
        entry.description_text().to_lowercase(),
    ];
    rule.normalized_keywords()
        .into_iter()
        .filter(|keyword| fields.iter().any(|field| field.contains(keyword.as_str())))
        .collect()
}

/// Finds the first rule in declaration order that matches `entry`.
pub fn first_rule_hit<'r>(entry: &EnableNswEntry, rules: &'r RuleSet) -> Option<RuleHit<'r>> {
    rules.iter().find_map(|rule| {
        let keywords = matched_keywords(entry, rule);
        (!keywords.is_empty()).then_some(RuleHit { rule, keywords })
    })
}

/// Best item of the rule's target category for `entry`.
///
/// Candidates are ranked by similarity between the entry subcategory and the
/// item name; ties go to the lowest item code.
pub fn best_in_category<'a>(
    entry: &EnableNswEntry,
    target_category: &str,
    index: &ItemIndex<'a>,
) -> Option<&'a NdisSupportItem> {
    let query = TokenSet::new(&entry.subcategory);
    index
        .in_category(target_category)
        .fold(None, |best, candidate| {
            prefer(best, candidate.item, query.ratio(&candidate.name))
        })
        .map(|(item, _)| item)
}

/// Runs the rule stage for one entry.
///
/// Only the first matching rule is considered. When its category has no
/// items the entry falls through to fuzzy matching.
pub fn match_rules<'r, 'a>(
    entry: &EnableNswEntry,
    rules: &'r RuleSet,
    index: &ItemIndex<'a>,
) -> Option<RuleMatch<'r, 'a>> {
    let hit = first_rule_hit(entry, rules)?;
    match best_in_category(entry, &hit.rule.target_ndis_category, index) {
        Some(item) => Some(RuleMatch {
            rule: hit.rule,
            keywords: hit.keywords,
            item,
        }),
        None => {
            debug!(
                rule = %hit.rule.name,
                category = %hit.rule.target_ndis_category,
                subcategory = %entry.subcategory,
                "rule matched but target category has no items"
            );
            None
        }
    }
}
