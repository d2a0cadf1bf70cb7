// crates/command-filter/src/config.rs
// ============================================================================
// Module: Command Filter Codec Configuration
// Description: Limits and switches applied when filters cross process boundaries.
// Purpose: Provide strict, fail-closed config parsing with hard bounds.
// Dependencies: serde, thiserror, toml, std
// ============================================================================

//! ## Overview
//! Filters received from other nodes are untrusted. [`CodecConfig`] bounds the
//! shape of what a node is willing to decode. It loads from a TOML file with a
//! size cap; missing fields fall back to defaults, out-of-range values are
//! rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "command-filter.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "COMMAND_FILTER_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum filter tree depth.
const DEFAULT_MAX_DEPTH: usize = 32;
/// Upper bound accepted for `max_depth`.
const MAX_MAX_DEPTH: usize = 256;
/// Default maximum total command names per filter.
const DEFAULT_MAX_NAMES: usize = 4096;
/// Upper bound accepted for `max_names`.
const MAX_MAX_NAMES: usize = 1_048_576;
/// Default maximum command name length in bytes.
const DEFAULT_MAX_NAME_LENGTH: usize = 256;
/// Upper bound accepted for `max_name_length`.
const MAX_MAX_NAME_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Codec Configuration
// ============================================================================

/// Limits applied when encoding and decoding filters.
///
/// # Invariants
/// - After [`CodecConfig::validate`] succeeds, every limit is non-zero and
///   within its hard upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Maximum nesting depth of a filter tree.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum total command names across all sets in a filter.
    #[serde(default = "default_max_names")]
    pub max_names: usize,
    /// Maximum length of a single command name in bytes.
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
    /// Validate filters before encoding.
    #[serde(default = "default_true")]
    pub validate_on_encode: bool,
    /// Validate filters after decoding.
    #[serde(default = "default_true")]
    pub validate_on_decode: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_names: DEFAULT_MAX_NAMES,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            validate_on_encode: true,
            validate_on_decode: true,
        }
    }
}

impl CodecConfig {
    /// Loads configuration from disk using the default resolution order.
    ///
    /// An explicit path wins, then `COMMAND_FILTER_CONFIG`, then
    /// `command-filter.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a limit is zero or above its hard bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_limit("max_depth", self.max_depth, MAX_MAX_DEPTH)?;
        validate_limit("max_names", self.max_names, MAX_MAX_NAMES)?;
        validate_limit("max_name_length", self.max_name_length, MAX_MAX_NAME_LENGTH)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading codec configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default for `max_depth`.
const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Default for `max_names`.
const fn default_max_names() -> usize {
    DEFAULT_MAX_NAMES
}

/// Default for `max_name_length`.
const fn default_max_name_length() -> usize {
    DEFAULT_MAX_NAME_LENGTH
}

/// Default for boolean switches that are on unless disabled.
const fn default_true() -> bool {
    true
}

/// Checks that a limit is non-zero and within its hard bound.
fn validate_limit(field: &str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{field} must be greater than zero")));
    }
    if value > max {
        return Err(ConfigError::Invalid(format!("{field} must not exceed {max}")));
    }
    Ok(())
}

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
