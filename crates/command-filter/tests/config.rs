// crates/command-filter/tests/config.rs
// ============================================================================
// Module: Codec Configuration Tests
// Description: Tests for TOML loading, defaults, and bounds of codec config.
// ============================================================================
//! ## Overview
//! Integration tests for [`command_filter::CodecConfig`].

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

use std::fs;

use command_filter::CodecConfig;
use command_filter::ConfigError;
use support::TestResult;
use support::ensure;

#[test]
fn empty_toml_yields_defaults() -> TestResult {
    let config = CodecConfig::from_toml_str("")?;
    ensure(config == CodecConfig::default(), "Expected defaults for empty config")?;
    ensure(config.max_depth == 32, "Expected default max_depth")?;
    ensure(config.validate_on_decode, "Expected decode validation on by default")?;
    Ok(())
}

#[test]
fn toml_overrides_selected_fields() -> TestResult {
    let config = CodecConfig::from_toml_str("max_depth = 8\nvalidate_on_encode = false\n")?;
    ensure(config.max_depth == 8, "Expected max_depth override")?;
    ensure(!config.validate_on_encode, "Expected encode validation disabled")?;
    ensure(config.max_names == CodecConfig::default().max_names, "Expected default max_names")?;
    Ok(())
}

#[test]
fn zero_limits_are_rejected() -> TestResult {
    let result = CodecConfig::from_toml_str("max_names = 0\n");
    ensure(
        matches!(&result, Err(ConfigError::Invalid(msg)) if msg.contains("max_names")),
        format!("Unexpected result {result:?}"),
    )?;
    Ok(())
}

#[test]
fn oversized_limits_are_rejected() -> TestResult {
    let result = CodecConfig::from_toml_str("max_depth = 100000\n");
    ensure(matches!(result, Err(ConfigError::Invalid(_))), "Expected bound violation")?;
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    let result = CodecConfig::from_toml_str("max_dept = 8\n");
    ensure(matches!(result, Err(ConfigError::Parse(_))), "Expected unknown field to fail")?;
    Ok(())
}

#[test]
fn load_reads_explicit_path() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("command-filter.toml");
    fs::write(&path, "max_name_length = 64\n")?;
    let config = CodecConfig::load(Some(path.as_path()))?;
    ensure(config.max_name_length == 64, "Expected max_name_length from file")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("big.toml");
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    fs::write(&path, padding)?;
    let result = CodecConfig::load(Some(path.as_path()));
    ensure(
        matches!(&result, Err(ConfigError::Invalid(msg)) if msg.contains("size limit")),
        format!("Unexpected result {result:?}"),
    )?;
    Ok(())
}

#[test]
fn load_reports_missing_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let result = CodecConfig::load(Some(dir.path().join("missing.toml").as_path()));
    ensure(matches!(result, Err(ConfigError::Io(_))), "Expected io error")?;
    Ok(())
}
