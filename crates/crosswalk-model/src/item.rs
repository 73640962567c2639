use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::join_non_empty;
use crate::lookup::fold_key;

/// A priced, coded line item from the NDIS assistive-technology code guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NdisSupportItem {
    /// Support item number, e.g. `05_221336811_0113_1_2`.
    pub item_code: String,
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    /// Sheet or word-processor table the row was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_table: Option<String>,
}

impl NdisSupportItem {
    pub fn new(item_code: impl Into<String>, item_name: impl Into<String>) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: item_name.into(),
            category: None,
            description: None,
            unit_price: None,
            source_table: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_source_table(mut self, table: impl Into<String>) -> Self {
        self.source_table = Some(table.into());
        self
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Item name and description joined for fuzzy comparison.
    pub fn composite_text(&self) -> String {
        join_non_empty(&[&self.item_name, self.description_text()])
    }

    /// True when the item's category equals `category` ignoring case and spacing.
    pub fn in_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|own| fold_key(own) == fold_key(category))
    }
}
