use std::path::PathBuf;

use thiserror::Error;

use crate::enums::ConfidenceTier;

/// Errors raised while building or loading a crosswalk configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("fuzzy threshold {value} is outside the allowed range {min}-{max}")]
    ThresholdOutOfRange { value: i64, min: u8, max: u8 },

    #[error("rule set is empty")]
    EmptyRuleSet,

    #[error("rule '{rule}' has no keywords")]
    EmptyKeywords { rule: String },

    #[error("rule '{rule}' has a blank target category")]
    BlankTargetCategory { rule: String },

    #[error("duplicate rule name: {rule}")]
    DuplicateRule { rule: String },

    #[error("rule '{rule}' declares tier '{tier}'; rule-based matches are always high")]
    RuleTierBelowHigh { rule: String, tier: ConfidenceTier },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
