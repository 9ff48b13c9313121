// crates/guideline-audit-config/src/lib.rs
// ============================================================================
// Module: Guideline Audit Config Library
// Description: Guideline registry model, loading, and validation.
// Purpose: Single source of truth for guideline-audit.toml semantics.
// Dependencies: guideline-audit-core, serde, toml
// ============================================================================

//! ## Overview
//! `guideline-audit-config` defines the on-disk guideline registry model. A
//! registry document maps guideline families to success criteria and their
//! technique identifiers; loading validates the document strictly and fails
//! closed before any run starts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod registry_file;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use registry_file::*;
