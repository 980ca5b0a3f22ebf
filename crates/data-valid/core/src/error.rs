//! Configuration errors
//!
//! Validation failures are never errors: they are shown on the page. These
//! cover configuration that cannot be turned into a rule.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed field configuration `{raw}`: {source}")]
    Malformed {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("length bounds out of order: min {min} > max {max}")]
    InvalidBounds { min: usize, max: usize },

    #[error("invalid pattern for rule `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),
}
