// crates/command-filter/tests/concurrency.rs
// ============================================================================
// Module: Concurrency Tests
// Description: Shared evaluation and composition across threads.
// ============================================================================
//! ## Overview
//! Filters are immutable values; evaluating and composing them from many
//! threads needs no synchronization.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::sync::Arc;
use std::thread;

use command_filter::CommandFilter;
use command_filter::NoPredicate;
use support::TestResult;
use support::ensure;

/// Name-set-only filter type used throughout these tests.
type Filter = CommandFilter<NoPredicate>;

/// Compile-time check that filters can cross threads.
const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn filters_are_send_and_sync() {
    assert_send_sync::<Filter>();
    assert_send_sync::<CommandFilter<String>>();
}

#[test]
fn concurrent_evaluation_agrees_with_sequential() -> TestResult {
    let filter = Arc::new(
        Filter::names(["CreateOrder", "CancelOrder"]).or(Filter::deny_names(["Refund", "Audit"])),
    );
    let probes = ["CreateOrder", "Refund", "Audit", "Ship", "CancelOrder"];
    let expected: Vec<bool> = probes.iter().map(|probe| filter.evaluate(*probe)).collect();

    let results = thread::scope(|scope| {
        let handles: Vec<_> = (0 .. 8)
            .map(|_| {
                let filter = Arc::clone(&filter);
                scope.spawn(move || {
                    (0 .. 1_000)
                        .map(|_| probes.iter().map(|probe| filter.evaluate(*probe)).collect())
                        .collect::<Vec<Vec<bool>>>()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join()).collect::<Vec<_>>()
    });

    for result in results {
        let rounds = result.map_err(|_| "worker thread panicked")?;
        for round in rounds {
            ensure(round == expected, "Expected identical results across threads")?;
        }
    }
    Ok(())
}

#[test]
fn concurrent_composition_leaves_operands_untouched() -> TestResult {
    let base = Filter::names(["A", "B", "C"]);
    let merged = thread::scope(|scope| {
        let handles: Vec<_> = ["A", "B", "X"]
            .into_iter()
            .map(|name| {
                let base = base.clone();
                scope.spawn(move || base.and(Filter::single(name)))
            })
            .collect();
        handles.into_iter().map(|handle| handle.join()).collect::<Vec<_>>()
    });

    ensure(base == Filter::names(["A", "B", "C"]), "Expected the shared operand to be unchanged")?;
    let merged = merged.into_iter().collect::<Result<Vec<_>, _>>().map_err(|_| "worker panicked")?;
    ensure(
        merged == vec![Filter::single("A"), Filter::single("B"), Filter::deny_all()],
        "Expected independent intersections",
    )?;
    Ok(())
}
