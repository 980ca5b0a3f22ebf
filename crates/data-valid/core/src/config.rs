//! Per-field configuration read from the tagging attribute
//!
//! The attribute holds strict JSON, e.g.
//! `{"type": "validLen", "min": 2, "max": 10, "text": "2-10 characters"}`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Parsed configuration of one tagged field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Rule name, built-in (any dialect) or registered at runtime
    #[serde(rename = "type")]
    pub rule_type: String,

    #[serde(default)]
    pub min: Option<usize>,

    #[serde(default)]
    pub max: Option<usize>,

    /// Message that replaces the rule's default message
    #[serde(default)]
    pub text: Option<String>,
}

impl FieldConfig {
    /// Parse an attribute value.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut config: FieldConfig =
            serde_json::from_str(raw).map_err(|source| ConfigError::Malformed {
                raw: raw.to_string(),
                source,
            })?;

        if config.text.as_deref().is_some_and(str::is_empty) {
            config.text = None;
        }

        Ok(config)
    }

    /// Custom message, if the markup supplied one
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl FromStr for FieldConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
