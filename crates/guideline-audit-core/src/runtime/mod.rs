// crates/guideline-audit-core/src/runtime/mod.rs
// ============================================================================
// Module: Runtime
// Description: Run orchestration and lifecycle hook plumbing.
// Purpose: Group the run loop, orchestrator, and hook record.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime drives a collection through `idle -> running -> complete` on
//! a single cooperative thread and fires the lifecycle hooks in contract
//! order.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod events;
pub mod runner;
