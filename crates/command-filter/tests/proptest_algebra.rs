// crates/command-filter/tests/proptest_algebra.rs
// ============================================================================
// Module: Filter Algebra Property-Based Tests
// Description: Property tests for the boolean laws of the filter algebra.
// Purpose: Check collapsing, negation, and behavioral equivalence across wide inputs.
// ============================================================================

//! Property-based tests for filter algebra invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use command_filter::CommandFilter;
use command_filter::NoPredicate;
use command_filter::serde_support::convenience;
use proptest::prelude::*;

/// Name-set-only filter type used throughout these tests.
type Filter = CommandFilter<NoPredicate>;

/// Small alphabet so generated sets overlap often.
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-E][a-c]{0,2}"
}

fn name_set_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(name_strategy(), 0 .. 6)
}

/// Arbitrary filters mixing every name-set variant and composite form.
fn filter_strategy() -> impl Strategy<Value = Filter> {
    let leaf = prop_oneof![
        name_set_strategy().prop_map(Filter::names),
        name_set_strategy().prop_map(Filter::deny_names),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(left, right)| left.and(right)),
            (inner.clone(), inner.clone()).prop_map(|(left, right)| left.or(right)),
            inner.prop_map(Filter::negate),
        ]
    })
}

proptest! {
    #[test]
    fn and_of_allow_sets_equals_intersection(a in name_set_strategy(), b in name_set_strategy()) {
        let combined = Filter::names(a.clone()).and(Filter::names(b.clone()));
        let expected = Filter::names(a.intersection(&b).cloned());
        prop_assert_eq!(&combined, &expected);
    }

    #[test]
    fn or_of_allow_sets_equals_union(a in name_set_strategy(), b in name_set_strategy()) {
        let combined = Filter::names(a.clone()).or(Filter::names(b.clone()));
        prop_assert_eq!(combined, Filter::names(a.union(&b).cloned()));
    }

    #[test]
    fn allow_set_negation_is_deny_set(a in name_set_strategy()) {
        let negated = Filter::names(a.clone()).negate();
        prop_assert_eq!(&negated, &Filter::deny_names(a.clone()));
        prop_assert_eq!(negated.negate(), Filter::names(a));
    }

    #[test]
    fn allow_set_and_or_are_idempotent(a in name_set_strategy()) {
        let filter = Filter::names(a);
        prop_assert_eq!(filter.clone().and(filter.clone()), filter.clone());
        prop_assert_eq!(filter.clone().or(filter.clone()), filter);
    }

    #[test]
    fn negation_complements_every_filter(f in filter_strategy(), probe in name_strategy()) {
        let negated = f.clone().negate();
        prop_assert_eq!(negated.evaluate(probe.as_str()), !f.evaluate(probe.as_str()));
        prop_assert_eq!(negated.negate().evaluate(probe.as_str()), f.evaluate(probe.as_str()));
    }

    #[test]
    fn and_or_match_boolean_semantics(
        f in filter_strategy(),
        g in filter_strategy(),
        probe in name_strategy(),
    ) {
        let left = f.evaluate(probe.as_str());
        let right = g.evaluate(probe.as_str());
        prop_assert_eq!(f.clone().and(g.clone()).evaluate(probe.as_str()), left && right);
        prop_assert_eq!(f.or(g).evaluate(probe.as_str()), left || right);
    }

    #[test]
    fn and_is_commutative_in_behavior(
        f in filter_strategy(),
        g in filter_strategy(),
        probe in name_strategy(),
    ) {
        let fg = f.clone().and(g.clone());
        let gf = g.and(f);
        prop_assert_eq!(fg.evaluate(probe.as_str()), gf.evaluate(probe.as_str()));
    }

    #[test]
    fn json_roundtrip_preserves_equality(f in filter_strategy()) {
        let json = convenience::to_json(&f).unwrap();
        let decoded: Filter = convenience::from_json(&json).unwrap();
        prop_assert_eq!(decoded, f);
    }

    #[test]
    fn merges_match_boolean_any_and_all(
        filters in prop::collection::vec(filter_strategy(), 0 .. 10),
        probe in name_strategy(),
    ) {
        let results: Vec<bool> = filters.iter().map(|f| f.evaluate(probe.as_str())).collect();
        let any = Filter::any_of(filters.iter().cloned());
        let all = Filter::all_of(filters);
        prop_assert_eq!(any.evaluate(probe.as_str()), results.iter().any(|result| *result));
        prop_assert_eq!(all.evaluate(probe.as_str()), results.iter().all(|result| *result));
    }

    #[test]
    fn allow_set_chains_collapse(sets in prop::collection::vec(name_set_strategy(), 1 .. 12)) {
        let merged = Filter::all_of(sets.iter().cloned().map(Filter::names));
        prop_assert_eq!(merged.complexity(), 1);
        let merged = Filter::any_of(sets.into_iter().map(Filter::names));
        prop_assert_eq!(merged.complexity(), 1);
    }
}
