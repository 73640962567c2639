use serde::{Deserialize, Serialize};

use crate::entry::EnableNswEntry;
use crate::enums::{ConfidenceTier, MatchMethod};
use crate::item::NdisSupportItem;

/// The crosswalk outcome for one EnableNSW entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswalkMapping {
    pub entry: EnableNswEntry,
    /// Best NDIS item; `None` means "no clear equivalent".
    pub matched_item: Option<NdisSupportItem>,
    pub match_method: MatchMethod,
    /// 0-100, only present for fuzzy matches.
    pub similarity_score: Option<u8>,
    pub confidence_tier: ConfidenceTier,
    /// Name of the rule that fired for rule-based matches.
    pub matched_rule: Option<String>,
    #[serde(default)]
    pub keywords_matched: Vec<String>,
    /// Linked repair/maintenance items, most similar first.
    #[serde(default)]
    pub repair_items: Vec<NdisSupportItem>,
    /// Why an entry was downgraded to review-required after a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CrosswalkMapping {
    /// A mapping with no NDIS equivalent.
    pub fn no_equivalent(entry: EnableNswEntry) -> Self {
        Self {
            entry,
            matched_item: None,
            match_method: MatchMethod::None,
            similarity_score: None,
            confidence_tier: ConfidenceTier::ReviewRequired,
            matched_rule: None,
            keywords_matched: Vec::new(),
            repair_items: Vec::new(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_mapped(&self) -> bool {
        self.matched_item.is_some()
    }

    pub fn item_code(&self) -> Option<&str> {
        self.matched_item.as_ref().map(|item| item.item_code.as_str())
    }

    /// NDIS category of the matched item, if any.
    pub fn ndis_category(&self) -> Option<&str> {
        self.matched_item
            .as_ref()
            .and_then(|item| item.category.as_deref())
    }

    pub fn repair_codes(&self) -> Vec<&str> {
        self.repair_items
            .iter()
            .map(|item| item.item_code.as_str())
            .collect()
    }
}
