// crates/guideline-audit-config/tests/support/mod.rs
// ============================================================================
// Module: Config Test Support
// Description: Shared assertion helpers for registry validation tests.
// ============================================================================
//! ## Overview
//! Minimal `Result`-based assertion helpers shared by the config test
//! binaries.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Shared across test binaries; test-only output and panic-based assertions are permitted."
)]

use std::fmt::Debug;

/// Boxed error alias for test helpers.
pub type TestError = Box<dyn std::error::Error>;

/// Result alias used by every test in this suite.
pub type TestResult = Result<(), TestError>;

/// Fails the test with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: &str) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(format!("assertion failed: {message}").into())
    }
}

/// Fails the test unless `left` equals `right`.
pub fn ensure_eq<T: PartialEq + Debug>(left: T, right: T, message: &str) -> TestResult {
    if left == right {
        Ok(())
    } else {
        Err(format!("assertion failed: {message}: {left:?} != {right:?}").into())
    }
}
