//! Tag configuration.
//!
//! Validation limits and character rules are read from `.rspace/tags.toml`
//! under the project root. Every field has a default, so a missing file or a
//! partial `[validation]` table is fine.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Location of the tag configuration relative to a project root.
pub const CONFIG_PATH: &str = ".rspace/tags.toml";

/// Errors loading tag configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid tag limits: min_length {min} exceeds max_length {max}")]
    InvalidLimits { min: usize, max: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Limits and character rules applied by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Accept only tags carrying full ontology metadata.
    #[serde(default)]
    pub enforce_ontologies: bool,
    /// Characters no tag may contain.
    #[serde(default = "default_forbidden_chars")]
    pub forbidden_chars: Vec<char>,
    /// Characters reserved by the codec; rejected in typed user input.
    #[serde(default = "default_reserved_chars")]
    pub reserved_chars: Vec<char>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            enforce_ontologies: false,
            forbidden_chars: default_forbidden_chars(),
            reserved_chars: default_reserved_chars(),
        }
    }
}

impl ValidationConfig {
    /// Check the limits are coherent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimits`] if `min_length > max_length`.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.min_length > self.max_length {
            return Err(ConfigError::InvalidLimits {
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(())
    }
}

const fn default_min_length() -> usize {
    2
}

const fn default_max_length() -> usize {
    200
}

fn default_forbidden_chars() -> Vec<char> {
    vec!['<', '>', '\\']
}

fn default_reserved_chars() -> Vec<char> {
    vec!['/', ',']
}

/// Load `.rspace/tags.toml` under `project_root`, falling back to defaults
/// when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed, or if
/// its limits are incoherent.
pub fn load_config(project_root: &Path) -> Result<TagsConfig, ConfigError> {
    let path = project_root.join(CONFIG_PATH);
    if !path.exists() {
        debug!(path = %path.display(), "no tag config, using defaults");
        return Ok(TagsConfig::default());
    }
    load_config_file(&path)
}

/// Load tag configuration from an explicit file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if its limits
/// are incoherent.
pub fn load_config_file(path: &Path) -> Result<TagsConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = toml::from_str::<TagsConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validation.check()?;

    info!(
        path = %path.display(),
        enforce_ontologies = config.validation.enforce_ontologies,
        "loaded tag config"
    );
    Ok(config)
}
