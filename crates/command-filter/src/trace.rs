// crates/command-filter/src/trace.rs
// ============================================================================
// Module: Filter Evaluation Trace
// Description: Trace hooks and a JSON-lines log trace for filter evaluation.
// Purpose: Observe which leaves decided a routing outcome without slowing the
//          untraced path.
// Dependencies: crate::filter, serde_json, thiserror, std
// ============================================================================

//! ## Overview
//! [`CommandFilter::evaluate`] runs with [`NoopTrace`], which compiles away.
//! Callers that need to explain a routing decision pass their own
//! [`FilterTrace`] to [`CommandFilter::evaluate_with_trace`], or a
//! [`LogTrace`] that writes one JSON record per event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use serde_json::json;
use thiserror::Error;

use crate::filter::CommandFilter;
use crate::filter::LogicalOp;
use crate::names::NameSet;

// ============================================================================
// SECTION: Trace Hooks
// ============================================================================

/// Trace hook for filter evaluation.
pub trait FilterTrace<P> {
    /// Called after a name-set or predicate leaf produced a result.
    fn on_leaf_evaluated(&mut self, leaf: &CommandFilter<P>, command_name: &str, accepted: bool);

    /// Called when a composite skipped its right operand.
    fn on_short_circuit(&mut self, _op: LogicalOp, _command_name: &str) {}
}

/// No-op trace hook for fast paths
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl<P> FilterTrace<P> for NoopTrace {
    fn on_leaf_evaluated(&mut self, _leaf: &CommandFilter<P>, _command_name: &str, _accepted: bool) {
    }
}

// ============================================================================
// SECTION: Log Trace
// ============================================================================

/// Errors emitted by [`LogTrace`].
#[derive(Debug, Error)]
pub enum TraceError {
    /// Writing a trace record failed.
    #[error("trace write failed: {0}")]
    WriteFailed(String),
}

/// Trace hook writing JSON-lines records to a writer.
///
/// The first write failure stops further output and is reported by
/// [`LogTrace::finish`].
pub struct LogTrace<W: Write> {
    /// Output writer for trace records.
    writer: W,
    /// Number of records written.
    records: u64,
    /// First write failure, if any.
    failure: Option<TraceError>,
}

impl<W: Write> LogTrace<W> {
    /// Creates a log trace over the writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            records: 0,
            failure: None,
        }
    }

    /// Returns the number of records written so far.
    #[must_use]
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Flushes the writer and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::WriteFailed`] when any record or the final flush failed.
    pub fn finish(mut self) -> Result<W, TraceError> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        self.writer.flush().map_err(|err| TraceError::WriteFailed(err.to_string()))?;
        Ok(self.writer)
    }

    /// Writes a single record followed by a newline.
    fn write_record(&mut self, record: &serde_json::Value) {
        if self.failure.is_some() {
            return;
        }
        if let Err(err) = serde_json::to_writer(&mut self.writer, record) {
            self.failure = Some(TraceError::WriteFailed(err.to_string()));
            return;
        }
        if let Err(err) = self.writer.write_all(b"\n") {
            self.failure = Some(TraceError::WriteFailed(err.to_string()));
            return;
        }
        self.records += 1;
    }
}

impl<P, W: Write> FilterTrace<P> for LogTrace<W> {
    fn on_leaf_evaluated(&mut self, leaf: &CommandFilter<P>, command_name: &str, accepted: bool) {
        let names = leaf.as_names().or_else(|| leaf.as_denied_names()).map(NameSet::len);
        let record = json!({
            "event": "leaf_evaluated",
            "kind": leaf.kind().as_str(),
            "command_name": command_name,
            "set_size": names,
            "accepted": accepted,
        });
        self.write_record(&record);
    }

    fn on_short_circuit(&mut self, op: LogicalOp, command_name: &str) {
        let record = json!({
            "event": "short_circuit",
            "op": op.as_str(),
            "command_name": command_name,
        });
        self.write_record(&record);
    }
}
