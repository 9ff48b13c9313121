// crates/guideline-audit-core/src/core/status.rs
// ============================================================================
// Module: Status Model
// Description: Case and criterion status labels with severity precedence.
// Purpose: Centralize the status algebra shared by Test and SuccessCriteria
//          aggregation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every case carries one of five status labels; tests and criteria derive
//! their own status from the cases beneath them using a fixed severity
//! precedence: `failed > cantTell > inapplicable > passed > untested`.
//! Invariants:
//! - Wire labels are stable camelCase strings for report compatibility.
//! - Aggregation is a pure, total function over any sequence of case statuses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Case Status
// ============================================================================

/// Status of one case: a single verdict on a single element.
///
/// # Invariants
/// - Variants are stable for serialization and report matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseStatus {
    /// No verdict has been produced yet.
    Untested,
    /// The element satisfies the assessment.
    Passed,
    /// The element violates the assessment.
    Failed,
    /// The assessment could not decide; human review is needed.
    CantTell,
    /// The assessment does not apply to the element.
    Inapplicable,
}

impl CaseStatus {
    /// All case statuses in ascending severity order.
    pub const ALL: [Self; 5] = [
        Self::Untested,
        Self::Passed,
        Self::Inapplicable,
        Self::CantTell,
        Self::Failed,
    ];

    /// Returns the severity rank used by the precedence rule (higher wins).
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Untested => 0,
            Self::Passed => 1,
            Self::Inapplicable => 2,
            Self::CantTell => 3,
            Self::Failed => 4,
        }
    }

    /// Returns the stable wire label for the status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Untested => "untested",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::CantTell => "cantTell",
            Self::Inapplicable => "inapplicable",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Severity Aggregation
// ============================================================================

/// Derives an aggregate status from a sequence of case statuses.
///
/// The rule encodes the severity precedence: `failed` if any case failed;
/// else `cantTell` if any case is undecided; else `inapplicable` if every
/// case is inapplicable; else `passed` if at least one case passed; else
/// `untested` (including the empty sequence).
#[must_use]
pub fn aggregate_statuses<I>(statuses: I) -> CaseStatus
where
    I: IntoIterator<Item = CaseStatus>,
{
    let mut seen_any = false;
    let mut all_inapplicable = true;
    let mut any_passed = false;
    let mut any_cant_tell = false;
    for status in statuses {
        seen_any = true;
        match status {
            CaseStatus::Failed => return CaseStatus::Failed,
            CaseStatus::CantTell => any_cant_tell = true,
            CaseStatus::Passed => {
                any_passed = true;
                all_inapplicable = false;
            }
            CaseStatus::Untested => all_inapplicable = false,
            CaseStatus::Inapplicable => {}
        }
    }
    if any_cant_tell {
        return CaseStatus::CantTell;
    }
    if seen_any && all_inapplicable {
        return CaseStatus::Inapplicable;
    }
    if any_passed {
        return CaseStatus::Passed;
    }
    CaseStatus::Untested
}

// ============================================================================
// SECTION: Criterion Status
// ============================================================================

/// Terminal status of one success criteria evaluation.
///
/// # Invariants
/// - Exactly one terminal variant is reached per evaluation; `Pending` is the
///   only non-terminal variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CriterionStatus {
    /// Evaluation has not reached a terminal state.
    Pending,
    /// The pre-evaluator guard rejected the criteria before any test was inspected.
    Inapplicable,
    /// No test in the collection references this criteria's techniques.
    NoTestCoverage,
    /// Tests matched but produced zero cases.
    NoResults,
    /// At least one matched case failed.
    Failed,
    /// No failures, but at least one matched case is undecided.
    CantTell,
    /// Matched cases passed under the precedence rule.
    Passed,
    /// Matched cases produced no verdict under the precedence rule.
    Untested,
}

impl CriterionStatus {
    /// Returns true when the status is terminal (evaluation is finished).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns the status a display consumer should report.
    ///
    /// A custom evaluator that never sets a terminal status leaves the
    /// criteria `Pending`; downstream consumers treat that as `NoResults`.
    #[must_use]
    pub const fn effective(self) -> Self {
        match self {
            Self::Pending => Self::NoResults,
            other => other,
        }
    }
}

impl From<CaseStatus> for CriterionStatus {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Untested => Self::Untested,
            CaseStatus::Passed => Self::Passed,
            CaseStatus::Failed => Self::Failed,
            CaseStatus::CantTell => Self::CantTell,
            CaseStatus::Inapplicable => Self::Inapplicable,
        }
    }
}

impl fmt::Display for CriterionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Inapplicable => "inapplicable",
            Self::NoTestCoverage => "noTestCoverage",
            Self::NoResults => "noResults",
            Self::Failed => "failed",
            Self::CantTell => "cantTell",
            Self::Passed => "passed",
            Self::Untested => "untested",
        };
        f.write_str(label)
    }
}
