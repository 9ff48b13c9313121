// crates/guideline-audit-core/src/lib.rs
// ============================================================================
// Module: Guideline Audit Core Root
// Description: Public API surface for the evaluation engine.
// Purpose: Wire together the core model, interfaces, and runtime modules.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! This crate evaluates a structured document against a library of
//! independent assessments and aggregates the per-element outcomes into
//! pass/fail verdicts for a hierarchy of guideline criteria. The document
//! model, the assessment predicates, and the guideline data are external
//! collaborators reached through the [`interfaces`] module; this crate owns
//! the orchestration, the result model, and the aggregation logic.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::case::Case;
pub use crate::core::case::CaseMetadata;
pub use crate::core::collection::RunState;
pub use crate::core::collection::TestCollection;
pub use crate::core::criteria::CriteriaEvaluator;
pub use crate::core::criteria::CriteriaPreEvaluator;
pub use crate::core::criteria::CriterionTotals;
pub use crate::core::criteria::SuccessCriteria;
pub use crate::core::error::AuditError;
pub use crate::core::error::AuditResult;
pub use crate::core::guidelines::CriterionMembership;
pub use crate::core::guidelines::GuidelineMembership;
pub use crate::core::guidelines::GuidelineRegistry;
pub use crate::core::identifiers::CriterionId;
pub use crate::core::identifiers::GuidelineFamily;
pub use crate::core::identifiers::NodeRef;
pub use crate::core::identifiers::TechniqueId;
pub use crate::core::identifiers::TestName;
pub use crate::core::status::CaseStatus;
pub use crate::core::status::CriterionStatus;
pub use crate::core::status::aggregate_statuses;
pub use crate::core::test::Test;
pub use crate::core::test::TestBinding;
pub use crate::core::test::TestOptions;
pub use crate::core::test::TestSpec;
pub use crate::interfaces::Assessment;
pub use crate::interfaces::AssessmentCatalog;
pub use crate::interfaces::AssessmentError;
pub use crate::interfaces::AssessmentMeta;
pub use crate::interfaces::AssessmentScope;
pub use crate::interfaces::CaseSink;
pub use crate::interfaces::DocumentQuery;
pub use crate::runtime::events::RunHooks;
pub use crate::runtime::runner::AuditRun;
pub use crate::runtime::runner::GuidelineSetup;
pub use crate::runtime::runner::RegistryGuideline;
pub use crate::runtime::runner::RunContext;
pub use crate::runtime::runner::RunOptions;
pub use crate::runtime::runner::RunOutcome;
