// crates/command-filter/src/lib.rs
// ============================================================================
// Module: Command Filter Root
// Description: Public API surface for command routing filters.
// Purpose: Wire together the filter algebra, wire codec, and supporting modules.
// Dependencies: crate::{config, error, filter, hashing, message, names, predicate, serde_support,
//              trace}
// ============================================================================

//! ## Overview
//! A routing endpoint in a distributed command bus advertises which commands it
//! accepts as a [`CommandFilter`]. Filters are evaluated on every dispatched
//! message and merged per node, so compositions of plain allow-sets collapse
//! into a single set instead of a growing tree.
//!
//! ```
//! use command_filter::CommandFilter;
//!
//! let orders: CommandFilter = CommandFilter::names(["CreateOrder", "CancelOrder"]);
//! let billing: CommandFilter = CommandFilter::names(["CancelOrder", "Refund"]);
//!
//! let shared = orders.clone().and(billing.clone());
//! assert_eq!(shared, CommandFilter::single("CancelOrder"));
//! assert!(orders.or(billing).evaluate("Refund"));
//! ```

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod filter;
pub mod hashing;
pub mod message;
pub mod names;
pub mod predicate;
pub mod serde_support;
pub mod trace;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CodecConfig;
pub use config::ConfigError;
pub use error::FilterError;
pub use error::FilterResult;
pub use filter::CommandFilter;
pub use filter::CompositeFilter;
pub use filter::FilterKind;
pub use filter::LogicalOp;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use hashing::filter_digest;
pub use message::CommandEnvelope;
pub use message::CommandMessage;
pub use names::NameSet;
pub use predicate::CommandPredicate;
pub use predicate::NoPredicate;
pub use serde_support::FilterCodec;
pub use serde_support::FilterValidator;
pub use trace::FilterTrace;
pub use trace::LogTrace;
pub use trace::NoopTrace;
pub use trace::TraceError;

// ============================================================================
// SECTION: Convenience Constructors
// ============================================================================

/// Convenience functions for creating filters without naming the type
pub mod convenience {
    use super::CommandFilter;

    /// Creates a filter accepting exactly the given command names
    #[must_use]
    pub fn accept<I, S>(names: I) -> CommandFilter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandFilter::names(names)
    }

    /// Creates a filter rejecting exactly the given command names
    #[must_use]
    pub fn reject<I, S>(names: I) -> CommandFilter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandFilter::deny_names(names)
    }

    /// Merges filters so any of them may accept a message
    #[must_use]
    pub fn any<P>(filters: Vec<CommandFilter<P>>) -> CommandFilter<P> {
        CommandFilter::any_of(filters)
    }

    /// Merges filters so all of them must accept a message
    #[must_use]
    pub fn all<P>(filters: Vec<CommandFilter<P>>) -> CommandFilter<P> {
        CommandFilter::all_of(filters)
    }

    /// Inverts a filter
    #[must_use]
    pub fn not<P>(filter: CommandFilter<P>) -> CommandFilter<P> {
        filter.negate()
    }
}
