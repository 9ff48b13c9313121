// crates/guideline-audit-core/src/core/error.rs
// ============================================================================
// Module: Audit Errors
// Description: Configuration-time errors surfaced before a run starts.
// Purpose: Give callers structured, stable error variants for setup mistakes.
// Dependencies: crate::core::identifiers, thiserror
// ============================================================================

//! ## Overview
//! Configuration errors are the only fatal error kind in the engine: they are
//! raised synchronously while assembling a collection or resolving a run, and
//! never during test execution. Predicate failures are isolated per test and
//! converted into `cantTell` cases instead (see the runtime module).

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::TestName;

// ============================================================================
// SECTION: Audit Error
// ============================================================================

/// Errors raised while configuring a collection or resolving a run.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// A test with the same name is already registered in the collection.
    #[error("duplicate test name: {name}")]
    DuplicateTestName {
        /// Name that collided.
        name: TestName,
    },
    /// An explicitly requested assessment is not present in the catalog.
    #[error("unknown assessment: {name}")]
    UnknownAssessment {
        /// Requested assessment name.
        name: String,
    },
    /// A guideline registry entry is structurally invalid.
    #[error("malformed guideline entry {family}:{criterion}: {reason}")]
    MalformedGuideline {
        /// Guideline family of the offending entry.
        family: String,
        /// Criterion identifier of the offending entry.
        criterion: String,
        /// Human-readable rejection reason.
        reason: String,
    },
    /// The collection is not idle, so tests cannot be added or a run started.
    #[error("test collection is not idle (state: {state})")]
    CollectionNotIdle {
        /// Run state label observed at the call.
        state: String,
    },
}

/// Convenience result alias for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;
