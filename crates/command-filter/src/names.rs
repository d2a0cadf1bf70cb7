// crates/command-filter/src/names.rs
// ============================================================================
// Module: Command Name Sets
// Description: Immutable, shareable sets of command names.
// Purpose: Back allow-set and deny-set filters with value-semantics sets.
// Dependencies: serde, std
// ============================================================================

//! ## Overview
//! [`NameSet`] is the data carried by the set-based filter variants. It is
//! copied from the caller's collection at construction, never mutated
//! afterwards, and shared by reference count so negation and cloning do not
//! copy the names again. Equality, hashing, and serialization depend only on
//! the contents; the ordered backing set keeps the wire form deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Name Set
// ============================================================================

/// Immutable set of command names.
///
/// # Invariants
/// - Contents never change after construction.
/// - The empty set is legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameSet(Arc<BTreeSet<String>>);

impl NameSet {
    /// Builds a set by copying the provided names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Arc::new(names.into_iter().map(Into::into).collect()))
    }

    /// Builds a set holding a single command name.
    pub fn single(name: impl Into<String>) -> Self {
        Self(Arc::new(BTreeSet::from([name.into()])))
    }

    /// Returns the empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true when `name` is a member.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the set holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns true when both sets share the same backing storage.
    pub(crate) fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the names present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if self.shares_storage(other) {
            return self.clone();
        }
        Self(Arc::new(self.0.intersection(&other.0).cloned().collect()))
    }

    /// Returns the names present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.shares_storage(other) || other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Self(Arc::new(self.0.union(&other.0).cloned().collect()))
    }
}

impl<S: Into<String>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a NameSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for NameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, name) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("}")
    }
}
