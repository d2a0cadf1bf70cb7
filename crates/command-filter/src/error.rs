// crates/command-filter/src/error.rs
// ============================================================================
// Module: Command Filter Errors
// Description: Structured diagnostics for filter validation and encoding.
// Purpose: Give codec and validation failures stable, matchable variants.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Filter composition and evaluation are total and never fail. Errors only
//! arise at the boundary where filters are encoded, decoded, or checked
//! against the structural limits of a [`crate::CodecConfig`].

use thiserror::Error;

/// Errors raised while validating or encoding command filters.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Filter tree nests deeper than allowed.
    #[error("filter tree too deep: {actual_depth} levels (max {max_depth})")]
    TooDeep {
        /// Maximum allowed depth.
        max_depth: usize,
        /// Depth encountered during validation.
        actual_depth: usize,
    },

    /// Filter references more command names than allowed.
    #[error("filter holds too many command names: {actual} (max {max_names})")]
    TooManyNames {
        /// Maximum allowed total of names across all sets.
        max_names: usize,
        /// Total encountered during validation.
        actual: usize,
    },

    /// A command name exceeds the length limit.
    #[error("command name too long: {actual_length} bytes (max {max_length})")]
    NameTooLong {
        /// Maximum allowed name length in bytes.
        max_length: usize,
        /// Length of the offending name.
        actual_length: usize,
    },

    /// A command name is empty or whitespace.
    #[error("command name must be non-empty")]
    EmptyName,

    /// Encoding a filter failed.
    #[error("filter serialization failed: {0}")]
    Serialization(String),

    /// Decoding a filter failed.
    #[error("filter deserialization failed: {0}")]
    Deserialization(String),
}

/// Convenient Result type for filter codec operations
pub type FilterResult<T = ()> = Result<T, FilterError>;
