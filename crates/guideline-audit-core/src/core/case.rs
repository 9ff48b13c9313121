// crates/guideline-audit-core/src/core/case.rs
// ============================================================================
// Module: Case Record
// Description: One assessment verdict on one element.
// Purpose: Provide the immutable result record accumulated by tests.
// Dependencies: crate::core::{identifiers, status}, serde
// ============================================================================

//! ## Overview
//! A [`Case`] is created by an assessment predicate during a test run and
//! owned by the test that recorded it. The status is fixed at construction
//! and never mutated afterward; document-level verdicts carry no element.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::NodeRef;
use crate::core::status::CaseStatus;

// ============================================================================
// SECTION: Case Metadata
// ============================================================================

/// Optional free-form annotations attached to a case.
///
/// # Invariants
/// - Treated as opaque by the engine; only reporting consumers interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMetadata {
    /// Human-readable message describing the verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Identifier of the rule that produced the verdict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl CaseMetadata {
    /// Returns true when no annotation is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.message.is_none() && self.rule_id.is_none()
    }
}

// ============================================================================
// SECTION: Case
// ============================================================================

/// One verdict on one element.
///
/// # Invariants
/// - `status` is immutable after construction.
/// - A case belongs to exactly one test once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Node the verdict applies to; `None` for document-level checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    element: Option<NodeRef>,
    /// Verdict status label.
    status: CaseStatus,
    /// Optional free-form annotations.
    #[serde(default, skip_serializing_if = "CaseMetadata::is_empty")]
    metadata: CaseMetadata,
}

impl Case {
    /// Creates a document-level case with the given status.
    #[must_use]
    pub const fn new(status: CaseStatus) -> Self {
        Self {
            element: None,
            status,
            metadata: CaseMetadata {
                message: None,
                rule_id: None,
            },
        }
    }

    /// Creates a case bound to a specific element.
    #[must_use]
    pub const fn for_element(element: NodeRef, status: CaseStatus) -> Self {
        Self {
            element: Some(element),
            status,
            metadata: CaseMetadata {
                message: None,
                rule_id: None,
            },
        }
    }

    /// Attaches a human-readable message to the case.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.metadata.message = Some(message.into());
        self
    }

    /// Attaches a rule identifier to the case.
    #[must_use]
    pub fn with_rule_id(mut self, rule_id: impl Into<String>) -> Self {
        self.metadata.rule_id = Some(rule_id.into());
        self
    }

    /// Returns the element the verdict applies to, if any.
    #[must_use]
    pub const fn element(&self) -> Option<&NodeRef> {
        self.element.as_ref()
    }

    /// Returns the verdict status.
    #[must_use]
    pub const fn status(&self) -> CaseStatus {
        self.status
    }

    /// Returns the attached metadata.
    #[must_use]
    pub const fn metadata(&self) -> &CaseMetadata {
        &self.metadata
    }
}
