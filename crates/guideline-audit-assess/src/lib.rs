// crates/guideline-audit-assess/src/lib.rs
// ============================================================================
// Module: Guideline Audit Assessments
// Description: Built-in assessments and registry utilities.
// Purpose: Provide ready-made checks aligned with the evaluation engine core.
// Dependencies: guideline-audit-core, async-trait
// ============================================================================

//! ## Overview
//! This crate ships built-in assessments (label presence, data-table headers,
//! readable text), a registry implementation that resolves assessments by
//! name, and an in-memory document tree for tests and demos. Assessments are
//! deterministic with respect to the supplied document and never mutate it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod data_table;
pub mod label;
pub mod memdoc;
pub mod readable_text;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use data_table::DataTableHeaders;
pub use label::LabelPresent;
pub use memdoc::MemDocument;
pub use readable_text::ReadableText;
pub use registry::AssessmentRegistry;

#[cfg(test)]
mod tests;
