// crates/command-filter/src/predicate.rs
// ============================================================================
// Module: Command Predicates
// Description: Open-ended predicate leaves for command filters.
// Purpose: Let domains plug arbitrary acceptance checks into the filter algebra.
// Dependencies: crate::message, serde, std
// ============================================================================

//! ## Overview
//! Name sets cover the common routing case, but a filter may also need to
//! consult something else about the message. [`CommandPredicate`] is the
//! boundary where domain-specific semantics enter the algebra, in the same way
//! a requirement tree hands off to its leaf predicates. Predicates never take
//! part in set collapsing; composing them always yields a composite filter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::message::CommandMessage;

// ============================================================================
// SECTION: Predicate Trait
// ============================================================================

/// Domain-specific acceptance check over a command message.
///
/// Implementations must be pure: filters may be evaluated concurrently and
/// composite evaluation may skip a predicate entirely when short-circuiting.
pub trait CommandPredicate {
    /// Returns true when the message is accepted.
    fn test<M: CommandMessage + ?Sized>(&self, message: &M) -> bool;
}

// ============================================================================
// SECTION: No Predicate
// ============================================================================

/// Uninhabited predicate type for filters built purely from name sets.
///
/// # Invariants
/// - No value of this type can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoPredicate {}

impl CommandPredicate for NoPredicate {
    fn test<M: CommandMessage + ?Sized>(&self, _message: &M) -> bool {
        match *self {}
    }
}

impl fmt::Display for NoPredicate {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
