// crates/command-filter/src/filter.rs
// ============================================================================
// Module: Command Filter Algebra
// Description: Boolean algebra over command-name routing filters.
// Purpose: Define `CommandFilter`, its composite form, and the composition engine
//          that collapses allow-set compositions into set operations.
// Dependencies: crate::{message, names, predicate, trace}, serde
// ============================================================================

//! ## Overview
//! A [`CommandFilter`] decides whether a routing endpoint accepts a command
//! message. Filters compose with `and`, `or`, and `negate`; the result always
//! behaves exactly like the classic boolean combination of its operands, but
//! the representation is chosen for evaluation cost:
//!
//! - allow-set AND allow-set collapses to the set intersection,
//! - allow-set OR allow-set collapses to the set union,
//! - negating an allow-set yields a deny-set over the same names and back,
//! - every other combination falls back to a [`CompositeFilter`].
//!
//! Chains of allow-sets therefore stay a single membership test no matter how
//! many handlers contributed to them. Filters are immutable values; every
//! operation returns a fresh filter and they are safe to share across threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::ops::BitAnd;
use std::ops::BitOr;
use std::ops::Not;

use serde::Deserialize;
use serde::Serialize;

use crate::message::CommandMessage;
use crate::names::NameSet;
use crate::predicate::CommandPredicate;
use crate::predicate::NoPredicate;
use crate::trace::FilterTrace;
use crate::trace::NoopTrace;

// ============================================================================
// SECTION: Logical Operators
// ============================================================================

/// Binary operator joining the operands of a [`CompositeFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    /// Both operands must accept.
    And,
    /// At least one operand must accept.
    Or,
}

impl LogicalOp {
    /// Returns the infix symbol used when rendering filters.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Returns the lowercase operator name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

// ============================================================================
// SECTION: Filter Kind
// ============================================================================

/// Variant tag of a [`CommandFilter`], independent of its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Allow-set filter.
    Names,
    /// Deny-set filter.
    DenyNames,
    /// Generic AND/OR composite.
    Composite,
    /// Generic negation wrapper.
    Not,
    /// Domain predicate leaf.
    Predicate,
}

impl FilterKind {
    /// Returns the wire tag for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Names => "names",
            Self::DenyNames => "deny_names",
            Self::Composite => "composite",
            Self::Not => "not",
            Self::Predicate => "predicate",
        }
    }
}

// ============================================================================
// SECTION: Command Filter
// ============================================================================

/// Routing filter over command messages.
///
/// The type parameter `P` is the domain predicate leaf. Filters built only from
/// name sets use the default [`NoPredicate`].
///
/// # Invariants
/// - Values are never mutated after construction.
/// - `Names` and `DenyNames` over the same set are never equal.
///
/// # Depth
/// Evaluation, `complexity`, `depth`, cloning, equality, and drop all recurse
/// once per nesting level. Trees nested many thousands of levels deep can
/// exhaust the thread stack, which aborts the process. Merge many handler
/// filters with [`CommandFilter::any_of`] / [`CommandFilter::all_of`], which
/// keep the tree logarithmic, and bound decoded input with
/// [`crate::CodecConfig::max_depth`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandFilter<P = NoPredicate> {
    /// Accepts exactly the listed command names.
    ///
    /// The empty set accepts nothing.
    Names(NameSet),

    /// Accepts every command name except the listed ones.
    ///
    /// The empty set accepts everything.
    DenyNames(NameSet),

    /// AND/OR of two arbitrary filters that could not be collapsed.
    Composite(CompositeFilter<P>),

    /// Logical complement of a filter without a cheaper closed form.
    Not(Box<Self>),

    /// Domain-specific predicate leaf.
    Predicate(P),
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl<P> CommandFilter<P> {
    /// Creates an allow-set filter from the given names.
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(NameSet::new(names))
    }

    /// Creates an allow-set filter accepting a single command name.
    pub fn single(name: impl Into<String>) -> Self {
        Self::Names(NameSet::single(name))
    }

    /// Creates a deny-set filter from the given names.
    pub fn deny_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DenyNames(NameSet::new(names))
    }

    /// Creates a filter from a domain predicate.
    pub const fn predicate(predicate: P) -> Self {
        Self::Predicate(predicate)
    }

    /// Creates a filter accepting every message (an empty deny-set).
    #[must_use]
    pub fn accept_all() -> Self {
        Self::DenyNames(NameSet::empty())
    }

    /// Creates a filter accepting no message (an empty allow-set).
    #[must_use]
    pub fn deny_all() -> Self {
        Self::Names(NameSet::empty())
    }

    /// Merges filters so a message is accepted when any of them accepts it.
    ///
    /// Adjacent allow-sets collapse into one set and the remaining operands are
    /// joined into a balanced tree, so merging `n` filters nests at most
    /// `ceil(log2(n)) + 1` levels. Operands are still evaluated in input order.
    ///
    /// Returns [`CommandFilter::deny_all`] for an empty input.
    pub fn any_of<I>(filters: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::merge(LogicalOp::Or, filters).unwrap_or_else(Self::deny_all)
    }

    /// Merges filters so a message is accepted only when all of them accept it.
    ///
    /// Nests the same way as [`CommandFilter::any_of`].
    ///
    /// Returns [`CommandFilter::accept_all`] for an empty input.
    pub fn all_of<I>(filters: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::merge(LogicalOp::And, filters).unwrap_or_else(Self::accept_all)
    }

    /// Collapses adjacent allow-sets, then joins neighbours pairwise until one
    /// filter remains.
    fn merge<I>(op: LogicalOp, filters: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut level: Vec<Self> = Vec::new();
        for filter in filters {
            match (level.pop(), filter) {
                (Some(last @ Self::Names(_)), next @ Self::Names(_)) => {
                    level.push(last.compose(op, next));
                }
                (Some(last), next) => {
                    level.push(last);
                    level.push(next);
                }
                (None, next) => level.push(next),
            }
        }

        while level.len() > 1 {
            let mut joined = Vec::with_capacity(level.len().div_ceil(2));
            let mut operands = level.into_iter();
            while let Some(left) = operands.next() {
                match operands.next() {
                    Some(right) => joined.push(left.compose(op, right)),
                    None => joined.push(left),
                }
            }
            level = joined;
        }
        level.pop()
    }
}

// ============================================================================
// SECTION: Composition Engine
// ============================================================================

impl<P> CommandFilter<P> {
    /// Returns the logical complement of this filter.
    ///
    /// Allow-sets and deny-sets flip into each other and a generic negation
    /// unwraps, so negating twice gives back an equal filter for those forms.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Names(names) => Self::DenyNames(names),
            Self::DenyNames(names) => Self::Names(names),
            Self::Not(inner) => *inner,
            other @ (Self::Composite(_) | Self::Predicate(_)) => Self::Not(Box::new(other)),
        }
    }

    /// Returns a filter accepting messages accepted by both filters.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.compose(LogicalOp::And, other)
    }

    /// Returns a filter accepting messages accepted by either filter.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.compose(LogicalOp::Or, other)
    }

    /// Combines two filters, collapsing allow-set pairs into one set.
    fn compose(self, op: LogicalOp, other: Self) -> Self {
        match (op, self, other) {
            (LogicalOp::And, Self::Names(left), Self::Names(right)) => {
                Self::Names(left.intersection(&right))
            }
            (LogicalOp::Or, Self::Names(left), Self::Names(right)) => {
                Self::Names(left.union(&right))
            }
            // Deny-set pairs and mixed pairs stay generic.
            (op, left, right) => Self::Composite(CompositeFilter::new(op, left, right)),
        }
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl<P: CommandPredicate> CommandFilter<P> {
    /// Returns true when this filter accepts the message.
    pub fn evaluate<M>(&self, message: &M) -> bool
    where
        M: CommandMessage + ?Sized,
    {
        self.evaluate_with_trace(message, &mut NoopTrace)
    }

    /// Evaluates this filter and reports leaf results and short circuits.
    pub fn evaluate_with_trace<M, T>(&self, message: &M, trace: &mut T) -> bool
    where
        M: CommandMessage + ?Sized,
        T: FilterTrace<P> + ?Sized,
    {
        match self {
            Self::Names(names) => {
                let accepted = names.contains(message.command_name());
                trace.on_leaf_evaluated(self, message.command_name(), accepted);
                accepted
            }
            Self::DenyNames(names) => {
                let accepted = !names.contains(message.command_name());
                trace.on_leaf_evaluated(self, message.command_name(), accepted);
                accepted
            }
            Self::Predicate(predicate) => {
                let accepted = predicate.test(message);
                trace.on_leaf_evaluated(self, message.command_name(), accepted);
                accepted
            }
            Self::Not(inner) => !inner.evaluate_with_trace(message, trace),
            Self::Composite(composite) => composite.evaluate_with_trace(message, trace),
        }
    }
}

// ============================================================================
// SECTION: Inspection
// ============================================================================

impl<P> CommandFilter<P> {
    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> FilterKind {
        match self {
            Self::Names(_) => FilterKind::Names,
            Self::DenyNames(_) => FilterKind::DenyNames,
            Self::Composite(_) => FilterKind::Composite,
            Self::Not(_) => FilterKind::Not,
            Self::Predicate(_) => FilterKind::Predicate,
        }
    }

    /// Returns the accepted names when this is an allow-set filter.
    #[must_use]
    pub const fn as_names(&self) -> Option<&NameSet> {
        match self {
            Self::Names(names) => Some(names),
            _ => None,
        }
    }

    /// Returns the rejected names when this is a deny-set filter.
    #[must_use]
    pub const fn as_denied_names(&self) -> Option<&NameSet> {
        match self {
            Self::DenyNames(names) => Some(names),
            _ => None,
        }
    }

    /// Returns true for the allow-set and deny-set variants.
    #[must_use]
    pub const fn is_name_set(&self) -> bool {
        matches!(self, Self::Names(_) | Self::DenyNames(_))
    }

    /// Returns the number of nodes in this filter tree.
    #[must_use]
    pub fn complexity(&self) -> usize {
        match self {
            Self::Names(_) | Self::DenyNames(_) | Self::Predicate(_) => 1,
            Self::Not(inner) => 1 + inner.complexity(),
            Self::Composite(composite) => {
                1 + composite.left.complexity() + composite.right.complexity()
            }
        }
    }

    /// Returns the nesting depth, counting a leaf as depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Names(_) | Self::DenyNames(_) | Self::Predicate(_) => 1,
            Self::Not(inner) => 1 + inner.depth(),
            Self::Composite(composite) => {
                1 + composite.left.depth().max(composite.right.depth())
            }
        }
    }
}

// ============================================================================
// SECTION: Composite Filter
// ============================================================================

/// Generic AND/OR of two filters.
///
/// Evaluation is short-circuiting: the left operand runs first and the right
/// operand is skipped once the result is decided.
///
/// # Invariants
/// - Operands are owned and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeFilter<P = NoPredicate> {
    /// Operator joining the operands.
    op: LogicalOp,
    /// Operand evaluated first.
    left: Box<CommandFilter<P>>,
    /// Operand evaluated only when the left one does not decide the result.
    right: Box<CommandFilter<P>>,
}

impl<P> CompositeFilter<P> {
    /// Creates a composite without attempting any simplification.
    pub fn new(op: LogicalOp, left: CommandFilter<P>, right: CommandFilter<P>) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the operator.
    #[must_use]
    pub const fn op(&self) -> LogicalOp {
        self.op
    }

    /// Returns the left operand.
    #[must_use]
    pub fn left(&self) -> &CommandFilter<P> {
        &self.left
    }

    /// Returns the right operand.
    #[must_use]
    pub fn right(&self) -> &CommandFilter<P> {
        &self.right
    }

    /// Splits the composite into its operator and operands.
    #[must_use]
    pub fn into_parts(self) -> (LogicalOp, CommandFilter<P>, CommandFilter<P>) {
        (self.op, *self.left, *self.right)
    }
}

impl<P: CommandPredicate> CompositeFilter<P> {
    /// Evaluates both operands with short-circuiting.
    pub fn evaluate_with_trace<M, T>(&self, message: &M, trace: &mut T) -> bool
    where
        M: CommandMessage + ?Sized,
        T: FilterTrace<P> + ?Sized,
    {
        let left = self.left.evaluate_with_trace(message, trace);
        match (self.op, left) {
            (LogicalOp::And, false) | (LogicalOp::Or, true) => {
                trace.on_short_circuit(self.op, message.command_name());
                left
            }
            _ => self.right.evaluate_with_trace(message, trace),
        }
    }
}

// ============================================================================
// SECTION: Operator Trait Implementations
// ============================================================================

impl<P> Not for CommandFilter<P> {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl<P> BitAnd for CommandFilter<P> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<P> BitOr for CommandFilter<P> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<P> From<NameSet> for CommandFilter<P> {
    fn from(names: NameSet) -> Self {
        Self::Names(names)
    }
}

// ============================================================================
// SECTION: Display
// ============================================================================

impl<P: fmt::Display> fmt::Display for CommandFilter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Names(names) => write!(f, "names{names}"),
            Self::DenyNames(names) => write!(f, "!names{names}"),
            Self::Composite(composite) => fmt::Display::fmt(composite, f),
            Self::Not(inner) => write!(f, "!({inner})"),
            Self::Predicate(predicate) => fmt::Display::fmt(predicate, f),
        }
    }
}

impl<P: fmt::Display> fmt::Display for CompositeFilter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op.symbol(), self.right)
    }
}
