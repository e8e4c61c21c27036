//! Configuration system for NCS learning.
//!
//! Load learner configuration from TOML or YAML files to tune the MaxSAT
//! objective and the post-decoding verification pass without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use ncs_config::LearningConfig;
//!
//! let config = LearningConfig::from_toml_str(r#"
//!     goal_weight = 3
//!     verify_decoded_model = true
//!     max_criteria = 12
//! "#).unwrap();
//!
//! assert_eq!(config.goal_weight, 3);
//! assert!(config.verify_decoded_model);
//! assert_eq!(config.max_criteria, Some(12));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use ncs_config::LearningConfig;
//!
//! let config = LearningConfig::load("learning.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert_eq!(config.goal_weight, 1);
//! ```

use std::path::Path;

use ncs_core::sat::Weight;
use ncs_core::MAX_CRITERIA;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_goal_weight() -> Weight {
    1
}

fn default_verify_decoded_model() -> bool {
    cfg!(debug_assertions)
}

/// Configuration of a MaxSAT coalitions learner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LearningConfig {
    /// Weight of each soft clause rewarding a correctly classified alternative.
    #[serde(default = "default_goal_weight")]
    pub goal_weight: Weight,

    /// Whether to cross-check the decoded model against the solver's
    /// assignment. Defaults to on in debug builds only.
    #[serde(default = "default_verify_decoded_model")]
    pub verify_decoded_model: bool,

    /// Optional cap on the number of criteria, below the coalition limit.
    #[serde(default)]
    pub max_criteria: Option<usize>,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            goal_weight: default_goal_weight(),
            verify_decoded_model: default_verify_decoded_model(),
            max_criteria: None,
        }
    }
}

impl LearningConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// describes an invalid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the soft clause weight.
    pub fn with_goal_weight(mut self, goal_weight: Weight) -> Self {
        self.goal_weight = goal_weight;
        self
    }

    /// Enables or disables the post-decoding verification pass.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify_decoded_model = verify;
        self
    }

    /// Caps the number of criteria a learner accepts.
    pub fn with_max_criteria(mut self, max_criteria: usize) -> Self {
        self.max_criteria = Some(max_criteria);
        self
    }

    /// Largest number of criteria a learner accepts under this configuration.
    pub fn criteria_limit(&self) -> usize {
        self.max_criteria
            .map_or(MAX_CRITERIA, |max| max.min(MAX_CRITERIA))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero goal weight.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.goal_weight == 0 {
            return Err(ConfigError::Invalid(
                "goal_weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
