use serde::{Deserialize, Serialize};

/// One EnableNSW assistive-technology category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableNswEntry {
    pub category: String,
    pub subcategory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnableNswEntry {
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        description: Option<&str>,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
        }
    }

    /// Description text, empty when absent.
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Category, subcategory and description joined for fuzzy comparison.
    pub fn composite_text(&self) -> String {
        join_non_empty(&[&self.category, &self.subcategory, self.description_text()])
    }
}

pub(crate) fn join_non_empty(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
