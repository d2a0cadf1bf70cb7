// crates/command-filter/src/hashing.rs
// ============================================================================
// Module: Command Filter Digests
// Description: RFC 8785 canonical JSON digests of filter wire forms.
// Purpose: Give equal filters the same fingerprint on every node.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! `Hash` on [`CommandFilter`] is consistent with equality but only within a
//! process. Nodes comparing routing capabilities need a fingerprint that is
//! stable across processes and builds, so the wire form is canonicalized with
//! RFC 8785 (JCS) and hashed with SHA-256.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

use crate::filter::CommandFilter;

// ============================================================================
// SECTION: Hash Algorithm
// ============================================================================

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 hashing.
    Sha256,
}

// ============================================================================
// SECTION: Hash Digest
// ============================================================================

/// Deterministic content hash representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashDigest {
    /// Hash algorithm identifier.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex-encoded digest bytes.
    pub value: String,
}

impl HashDigest {
    /// Creates a new digest from raw bytes.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, bytes: &[u8]) -> Self {
        Self {
            algorithm,
            value: hex_encode(bytes),
        }
    }
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing canonical digests.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Returns the RFC 8785 canonical JSON bytes of a filter.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn canonical_filter_bytes<P: Serialize>(
    filter: &CommandFilter<P>,
) -> Result<Vec<u8>, HashError> {
    serde_jcs::to_vec(filter).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Returns the SHA-256 digest of a filter's canonical wire form.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn filter_digest<P: Serialize>(filter: &CommandFilter<P>) -> Result<HashDigest, HashError> {
    let bytes = canonical_filter_bytes(filter)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(HashDigest::new(HashAlgorithm::Sha256, &hasher.finalize()))
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[usize::from(byte >> 4)] as char);
        out.push(HEX[usize::from(byte & 0x0f)] as char);
    }
    out
}
