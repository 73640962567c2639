//! Keyword rules that classify EnableNSW entries into NDIS categories.
//!
//! Rules are plain data. A [`RuleSet`] is versioned and ordered: the first
//! rule whose keywords match an entry wins, ties being impossible because
//! evaluation follows declaration order.
//!
//! # TOML format
//!
//! ```toml
//! version = "local-2025-26"
//!
//! [[rules]]
//! name = "manual wheelchair"
//! keywords = ["manual", "wheelchair"]
//! target_ndis_category = "Personal Mobility"
//! fixed_confidence_tier = "high"
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::ConfidenceTier;
use crate::error::{ConfigError, Result};

/// Version tag of the built-in rule set.
pub const DEFAULT_RULESET_VERSION: &str = "enablensw-ndis-builtin-1";

fn default_rule_tier() -> ConfidenceTier {
    ConfidenceTier::High
}

fn default_ruleset_version() -> String {
    "custom".to_string()
}

/// A single keyword-to-category rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    pub name: String,
    /// Matched case-insensitively as substrings of the entry text.
    pub keywords: Vec<String>,
    pub target_ndis_category: String,
    #[serde(default = "default_rule_tier")]
    pub fixed_confidence_tier: ConfidenceTier,
}

impl MappingRule {
    pub fn new<I, S>(name: impl Into<String>, keywords: I, target: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            target_ndis_category: target.into(),
            fixed_confidence_tier: ConfidenceTier::High,
        }
    }

    /// Keywords lowercased and trimmed, blanks removed, declaration order kept.
    pub fn normalized_keywords(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.normalized_keywords().is_empty() {
            return Err(ConfigError::EmptyKeywords {
                rule: self.name.clone(),
            });
        }
        if self.target_ndis_category.trim().is_empty() {
            return Err(ConfigError::BlankTargetCategory {
                rule: self.name.clone(),
            });
        }
        if self.fixed_confidence_tier != ConfidenceTier::High {
            return Err(ConfigError::RuleTierBelowHigh {
                rule: self.name.clone(),
                tier: self.fixed_confidence_tier,
            });
        }
        Ok(())
    }
}

/// Ordered, versioned collection of [`MappingRule`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default = "default_ruleset_version")]
    pub version: String,
    pub rules: Vec<MappingRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    /// Creates a validated rule set.
    pub fn new(version: impl Into<String>, rules: Vec<MappingRule>) -> Result<Self> {
        let set = Self {
            version: version.into(),
            rules,
        };
        set.validate()?;
        Ok(set)
    }

    /// The rules shipped with the tool, covering the common EnableNSW
    /// equipment families.
    pub fn builtin() -> Self {
        fn rule(name: &str, keywords: &[&str], target: &str) -> MappingRule {
            MappingRule::new(name, keywords.iter().copied(), target)
        }
        Self {
            version: DEFAULT_RULESET_VERSION.to_string(),
            rules: vec![
                rule(
                    "manual wheelchair",
                    &["manual", "wheelchair", "push"],
                    "Personal Mobility",
                ),
                rule(
                    "power wheelchair",
                    &["power", "electric", "motorised", "wheelchair"],
                    "Personal Mobility",
                ),
                rule("mobility scooter", &["scooter", "mobility"], "Personal Mobility"),
                rule(
                    "walking frame",
                    &["walking frame", "walker", "rollator"],
                    "Personal Mobility",
                ),
                rule(
                    "speech device",
                    &["speech", "communication", "voice", "aac"],
                    "Communication",
                ),
                rule("hearing aid", &["hearing", "audio", "amplification"], "Hearing"),
                rule(
                    "magnifier",
                    &["magnify", "vision", "low vision", "sight"],
                    "Vision",
                ),
                rule("braille", &["braille", "tactile"], "Vision"),
                rule(
                    "bathroom aid",
                    &["bathroom", "toilet", "shower", "bath"],
                    "Daily Living",
                ),
                rule("kitchen aid", &["kitchen", "cooking", "dining"], "Daily Living"),
                rule(
                    "cushion",
                    &["cushion", "seating", "positioning"],
                    "Seating and Positioning",
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingRule> {
        self.rules.iter()
    }

    /// Checks every rule and rejects duplicate names.
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(ConfigError::EmptyRuleSet);
        }
        let mut seen = BTreeSet::new();
        for rule in &self.rules {
            rule.validate()?;
            if !seen.insert(rule.name.trim().to_lowercase()) {
                return Err(ConfigError::DuplicateRule {
                    rule: rule.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Parses and validates a rule set from TOML text.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let set: RuleSet = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
        set.validate()?;
        Ok(set)
    }

    /// Loads a rule set from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&text, path)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a MappingRule;
    type IntoIter = std::slice::Iter<'a, MappingRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
