//! Index configuration for JSON record sets
//!
//! A config file names the primary key field and the fields to index:
//!
//! ```json
//! { "primary_key": "id", "indexed_fields": ["category", "price"] }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read(_) => "CONFIG_READ_FAILED",
            ConfigError::InvalidJson(_) => "CONFIG_INVALID_JSON",
            ConfigError::Invalid(_) => "CONFIG_INVALID",
        }
    }
}

/// Which fields of a JSON record identify and index it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Field holding the primary key (required)
    pub primary_key: String,

    /// Fields to build secondary indexes on (optional, default none)
    #[serde(default)]
    pub indexed_fields: Vec<String>,
}

impl IndexConfig {
    pub fn new(primary_key: impl Into<String>, indexed_fields: Vec<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            indexed_fields,
        }
    }

    /// Load and validate configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: IndexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty names and duplicate indexed fields
    pub fn validate(&self) -> ConfigResult<()> {
        if self.primary_key.is_empty() {
            return Err(ConfigError::Invalid("primary_key must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for field in &self.indexed_fields {
            if field.is_empty() {
                return Err(ConfigError::Invalid(
                    "indexed_fields must not contain empty names".into(),
                ));
            }
            if !seen.insert(field.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate indexed field: '{}'",
                    field
                )));
            }
        }

        Ok(())
    }
}
