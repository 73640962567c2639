//! Configuration options for a crosswalk run.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::rule::RuleSet;

/// Keywords that mark an NDIS item as repair or maintenance scope.
pub const DEFAULT_REPAIR_KEYWORDS: [&str; 3] = ["repair", "maintenance", "service"];

/// Minimum similarity score (0-100) a fuzzy candidate needs to be accepted.
///
/// The threshold is inclusive: a candidate scoring exactly the threshold
/// is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct FuzzyThreshold(u8);

impl FuzzyThreshold {
    pub const MIN: u8 = 60;
    pub const MAX: u8 = 95;
    pub const DEFAULT: u8 = 80;

    pub fn new(value: u8) -> Result<Self> {
        Self::try_from(i64::from(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// True when `score` reaches the threshold.
    pub fn accepts(self, score: u8) -> bool {
        score >= self.0
    }
}

impl Default for FuzzyThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for FuzzyThreshold {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ConfigError::ThresholdOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value as u8))
    }
}

impl From<FuzzyThreshold> for u8 {
    fn from(value: FuzzyThreshold) -> Self {
        value.0
    }
}

impl fmt::Display for FuzzyThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_repair_keywords() -> Vec<String> {
    DEFAULT_REPAIR_KEYWORDS.iter().map(|k| (*k).to_string()).collect()
}

/// Inputs that, together with the two source tables, fully determine a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswalkConfig {
    #[serde(default)]
    pub fuzzy_threshold: FuzzyThreshold,
    #[serde(default)]
    pub include_repair_codes: bool,
    #[serde(default)]
    pub mapping_rules: RuleSet,
    #[serde(default = "default_repair_keywords")]
    pub repair_keywords: Vec<String>,
}

impl Default for CrosswalkConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: FuzzyThreshold::default(),
            include_repair_codes: false,
            mapping_rules: RuleSet::builtin(),
            repair_keywords: default_repair_keywords(),
        }
    }
}

impl CrosswalkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: FuzzyThreshold) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_repair_codes(mut self, enable: bool) -> Self {
        self.include_repair_codes = enable;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.mapping_rules = rules;
        self
    }

    #[must_use]
    pub fn with_repair_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repair_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Repair keywords lowercased with blanks removed.
    pub fn normalized_repair_keywords(&self) -> Vec<String> {
        self.repair_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        self.mapping_rules.validate()
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        let config: CrosswalkConfig = toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&text, path)
    }
}
