//! Match provenance and confidence tiers.
//!
//! Both enums serialize in kebab-case (`rule-based`, `functional-equivalent`)
//! and carry the user-facing labels used by the crosswalk report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an EnableNSW entry was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    /// An explicit keyword rule fired and its category had an eligible item.
    RuleBased,
    /// Approximate string similarity reached the threshold.
    Fuzzy,
    /// Nothing matched; the entry needs human review.
    None,
}

impl MatchMethod {
    pub const ALL: [MatchMethod; 3] = [Self::RuleBased, Self::Fuzzy, Self::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::RuleBased => "rule-based",
            MatchMethod::Fuzzy => "fuzzy",
            MatchMethod::None => "none",
        }
    }

    /// Label shown in the crosswalk table.
    pub fn label(&self) -> &'static str {
        match self {
            MatchMethod::RuleBased => "Rule-based",
            MatchMethod::Fuzzy => "Fuzzy matching",
            MatchMethod::None => "None",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "rule-based" | "rule" => Ok(MatchMethod::RuleBased),
            "fuzzy" => Ok(MatchMethod::Fuzzy),
            "none" => Ok(MatchMethod::None),
            other => Err(format!("unknown match method: {other}")),
        }
    }
}

/// Trustworthiness of a crosswalk mapping.
///
/// Declaration order runs from most to least trusted, so `Ord` sorts
/// `High` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceTier {
    /// Direct line item.
    High,
    /// Best-fit functional equivalent.
    FunctionalEquivalent,
    /// No clear equivalent; review required.
    ReviewRequired,
}

impl ConfidenceTier {
    pub const ALL: [ConfidenceTier; 3] = [
        Self::High,
        Self::FunctionalEquivalent,
        Self::ReviewRequired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::FunctionalEquivalent => "functional-equivalent",
            ConfidenceTier::ReviewRequired => "review-required",
        }
    }

    /// Label shown in the crosswalk table and pivot summary.
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "Direct line item (High confidence)",
            ConfidenceTier::FunctionalEquivalent => "Best-fit (Functional equivalent)",
            ConfidenceTier::ReviewRequired => "No clear equivalent (Review required)",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfidenceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "high" | "direct" => Ok(ConfidenceTier::High),
            "functional-equivalent" | "best-fit" => Ok(ConfidenceTier::FunctionalEquivalent),
            "review-required" | "review" => Ok(ConfidenceTier::ReviewRequired),
            other => Err(format!("unknown confidence tier: {other}")),
        }
    }
}
