// crates/guideline-audit-core/src/core/mod.rs
// ============================================================================
// Module: Core Model
// Description: Result model and aggregation types of the evaluation engine.
// Purpose: Group the case/test/collection/criteria model and its identifiers.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! The core model is the data the engine produces and aggregates: cases
//! recorded by tests, tests grouped in a collection, and criteria derived
//! from guideline configuration. Everything here is append-only during a run.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod case;
pub mod collection;
pub mod criteria;
pub mod error;
pub mod guidelines;
pub mod identifiers;
pub mod status;
