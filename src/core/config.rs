//! core::config
//!
//! Pipeline configuration schema and loading.
//!
//! # Overview
//!
//! A host describes its stacked translation stages declaratively: one entry
//! per stage, ordered newest-to-oldest, each carrying the stage tag and the
//! display-name format of the version the stage translates down to.
//!
//! ```toml
//! [[stages]]
//! tag = "vb|1.13to1.12"
//! name_format = "json"
//!
//! [[stages]]
//! tag = "vb|1.12to1.11"
//! ```
//!
//! # Validation
//!
//! Config values are validated after parsing. Stage tags must parse as
//! [`StageTag`], and tags must be unique: two stages sharing a tag would
//! read and clear each other's backup slots.
//!
//! # Locations
//!
//! A library does not own config file locations; hosts pass a path to
//! [`PipelineConfig::load`] or a string to [`PipelineConfig::from_toml_str`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{NameFormat, StageTag, TypeError};

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse pipeline config: {0}")]
    ParseError(String),

    #[error("duplicate stage tag '{0}'")]
    DuplicateStage(String),

    #[error("type validation failed: {0}")]
    Type(#[from] TypeError),
}

/// Settings for one translation stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StageConfig {
    /// Stage tag prefixing every backup slot the stage writes.
    pub tag: StageTag,

    /// Display-name format of the version this stage translates down to.
    #[serde(default)]
    pub name_format: NameFormat,
}

/// Declarative description of a stacked translation pipeline.
///
/// # Example
///
/// ```
/// use keepsake::core::config::PipelineConfig;
///
/// let config = PipelineConfig::from_toml_str(r#"
///     [[stages]]
///     tag = "vb|1.13to1.12"
///     name_format = "json"
/// "#).unwrap();
///
/// assert_eq!(config.stages.len(), 1);
/// assert_eq!(config.stages[0].tag.as_str(), "vb|1.13to1.12");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Stages ordered newest-to-oldest.
    pub stages: Vec<StageConfig>,
}

impl PipelineConfig {
    /// Parse a pipeline config from TOML and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed, a stage tag is invalid,
    /// or two stages share a tag.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a pipeline config from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateStage` if two stages share a tag.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for stage in &self.stages {
            if !seen.insert(stage.tag.as_str()) {
                return Err(ConfigError::DuplicateStage(stage.tag.to_string()));
            }
        }
        Ok(())
    }
}
