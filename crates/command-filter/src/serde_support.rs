// crates/command-filter/src/serde_support.rs
// ============================================================================
// Module: Command Filter Serde Support
// Description: Wire encoding and structural validation for command filters.
// Purpose: Move filters between nodes as JSON or RON with fail-closed checks.
// Dependencies: crate::{config, error, filter, names}, ron, serde, serde_json
// ============================================================================

//! ## Overview
//! Filters describe a node's routing capability and travel between nodes.
//! The wire form is the serde derive of [`CommandFilter`]: an externally
//! tagged variant (`names`, `deny_names`, `composite`, `not`, `predicate`)
//! around its data. Evaluation behavior is never encoded; decoding rebuilds a
//! filter equal to the one that was encoded.
//!
//! Decoded filters are untrusted. [`FilterCodec`] validates depth, total name
//! count, and name length against a [`CodecConfig`] and fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::config::CodecConfig;
use crate::error::FilterError;
use crate::error::FilterResult;
use crate::filter::CommandFilter;
use crate::names::NameSet;

// ============================================================================
// SECTION: Filter Validator
// ============================================================================

/// Structural validator for filter trees.
///
/// # Invariants
/// - Uses the stored [`CodecConfig`] for all validation decisions.
#[derive(Debug, Clone, Default)]
pub struct FilterValidator {
    /// Limits applied during validation.
    config: CodecConfig,
}

impl FilterValidator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self {
            config,
        }
    }

    /// Creates a validator with default limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Validates a filter tree.
    ///
    /// Predicate leaves are opaque here; domains validate them on their own.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when the filter violates a structural limit.
    pub fn validate<P>(&self, filter: &CommandFilter<P>) -> FilterResult {
        let mut total_names = 0usize;
        self.validate_node(filter, 1, &mut total_names)
    }

    /// Validates one node and recurses into its operands.
    fn validate_node<P>(
        &self,
        filter: &CommandFilter<P>,
        depth: usize,
        total_names: &mut usize,
    ) -> FilterResult {
        if depth > self.config.max_depth {
            return Err(FilterError::TooDeep {
                max_depth: self.config.max_depth,
                actual_depth: depth,
            });
        }

        match filter {
            CommandFilter::Names(names) | CommandFilter::DenyNames(names) => {
                self.validate_names(names, total_names)
            }
            CommandFilter::Composite(composite) => {
                self.validate_node(composite.left(), depth + 1, total_names)?;
                self.validate_node(composite.right(), depth + 1, total_names)
            }
            CommandFilter::Not(inner) => self.validate_node(inner, depth + 1, total_names),
            CommandFilter::Predicate(_) => Ok(()),
        }
    }

    /// Checks the names of one set and adds them to the running total.
    fn validate_names(&self, names: &NameSet, total_names: &mut usize) -> FilterResult {
        *total_names = total_names.saturating_add(names.len());
        if *total_names > self.config.max_names {
            return Err(FilterError::TooManyNames {
                max_names: self.config.max_names,
                actual: *total_names,
            });
        }
        for name in names.iter() {
            if name.trim().is_empty() {
                return Err(FilterError::EmptyName);
            }
            if name.len() > self.config.max_name_length {
                return Err(FilterError::NameTooLong {
                    max_length: self.config.max_name_length,
                    actual_length: name.len(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Filter Codec
// ============================================================================

/// Encodes and decodes filters with validation.
///
/// The algebra accepts any command name, but the codec applies the same
/// limits on both sides of the wire. With `validate_on_encode` enabled (the
/// default), encoding fails for filters that evaluate fine in-process yet
/// could not be decoded by a peer: blank names, over-long names, too many
/// names, or trees deeper than `max_depth`.
///
/// # Invariants
/// - Uses the stored [`FilterValidator`] for structural checks.
#[derive(Debug, Clone, Default)]
pub struct FilterCodec {
    /// Validator used to enforce structural limits.
    validator: FilterValidator,
}

impl FilterCodec {
    /// Creates a codec with the given configuration.
    #[must_use]
    pub const fn new(config: CodecConfig) -> Self {
        Self {
            validator: FilterValidator::new(config),
        }
    }

    /// Creates a codec with default limits.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        self.validator.config()
    }

    /// Serializes a filter to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if validation or serialization fails, including
    /// [`FilterError::EmptyName`] for blank names the algebra itself accepts.
    pub fn to_json<P: Serialize>(&self, filter: &CommandFilter<P>) -> FilterResult<String> {
        self.check_encode(filter)?;
        serde_json::to_string(filter).map_err(|err| FilterError::Serialization(err.to_string()))
    }

    /// Deserializes a filter from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if parsing or validation fails.
    pub fn from_json<P>(&self, json: &str) -> FilterResult<CommandFilter<P>>
    where
        P: for<'de> Deserialize<'de>,
    {
        let filter: CommandFilter<P> = serde_json::from_str(json)
            .map_err(|err| FilterError::Deserialization(err.to_string()))?;
        self.check_decode(&filter)?;
        Ok(filter)
    }

    /// Serializes a filter to pretty-printed RON for human-edited routing files.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if validation or serialization fails.
    pub fn to_ron<P: Serialize>(&self, filter: &CommandFilter<P>) -> FilterResult<String> {
        self.check_encode(filter)?;
        ron::ser::to_string_pretty(filter, ron::ser::PrettyConfig::default())
            .map_err(|err| FilterError::Serialization(err.to_string()))
    }

    /// Deserializes a filter from RON.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if parsing or validation fails.
    pub fn from_ron<P>(&self, ron_str: &str) -> FilterResult<CommandFilter<P>>
    where
        P: for<'de> Deserialize<'de>,
    {
        let filter: CommandFilter<P> =
            ron::from_str(ron_str).map_err(|err| FilterError::Deserialization(err.to_string()))?;
        self.check_decode(&filter)?;
        Ok(filter)
    }

    /// Validates a filter without encoding it.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when the filter violates a structural limit.
    pub fn validate<P>(&self, filter: &CommandFilter<P>) -> FilterResult {
        self.validator.validate(filter)
    }

    /// Runs validation before encoding when enabled.
    fn check_encode<P>(&self, filter: &CommandFilter<P>) -> FilterResult {
        if self.config().validate_on_encode {
            self.validator.validate(filter)?;
        }
        Ok(())
    }

    /// Runs validation after decoding when enabled.
    fn check_decode<P>(&self, filter: &CommandFilter<P>) -> FilterResult {
        if self.config().validate_on_decode {
            self.validator.validate(filter)?;
        }
        Ok(())
    }
}

/// Convenience functions for encoding without an explicit codec
///
/// These use the default limits. Build a [`FilterCodec`] for custom limits.
pub mod convenience {
    use super::CommandFilter;
    use super::Deserialize;
    use super::FilterCodec;
    use super::FilterResult;
    use super::FilterValidator;
    use super::Serialize;

    /// Serialize a filter to JSON with default limits.
    ///
    /// # Errors
    /// Returns [`super::FilterError`] if validation or serialization fails.
    pub fn to_json<P: Serialize>(filter: &CommandFilter<P>) -> FilterResult<String> {
        FilterCodec::default().to_json(filter)
    }

    /// Deserialize a filter from JSON with default limits.
    ///
    /// # Errors
    /// Returns [`super::FilterError`] if parsing or validation fails.
    pub fn from_json<P: for<'de> Deserialize<'de>>(json: &str) -> FilterResult<CommandFilter<P>> {
        FilterCodec::default().from_json(json)
    }

    /// Serialize a filter to RON with default limits.
    ///
    /// # Errors
    /// Returns [`super::FilterError`] if validation or serialization fails.
    pub fn to_ron<P: Serialize>(filter: &CommandFilter<P>) -> FilterResult<String> {
        FilterCodec::default().to_ron(filter)
    }

    /// Deserialize a filter from RON with default limits.
    ///
    /// # Errors
    /// Returns [`super::FilterError`] if parsing or validation fails.
    pub fn from_ron<P: for<'de> Deserialize<'de>>(ron_str: &str) -> FilterResult<CommandFilter<P>> {
        FilterCodec::default().from_ron(ron_str)
    }

    /// Validate a filter with default limits.
    ///
    /// # Errors
    /// Returns [`super::FilterError`] when the filter violates a structural limit.
    pub fn validate<P>(filter: &CommandFilter<P>) -> FilterResult {
        FilterValidator::with_defaults().validate(filter)
    }

    /// Quick validation check that returns a boolean
    pub fn is_valid<P>(filter: &CommandFilter<P>) -> bool {
        validate(filter).is_ok()
    }
}
