// crates/guideline-audit-core/src/core/criteria.rs
// ============================================================================
// Module: Success Criteria
// Description: One guideline criterion aggregating results from matched tests.
// Purpose: Filter a collection for relevant tests and derive a terminal
//          criterion status with reconciled totals.
// Dependencies: crate::core::{case, collection, guidelines, identifiers,
//               status, test}, serde
// ============================================================================

//! ## Overview
//! A [`SuccessCriteria`] represents one evaluable requirement within a
//! guideline family. It matches the subset of a collection whose technique
//! tags intersect its own, buckets their cases under conclusion labels, and
//! walks a fixed ladder to exactly one terminal status:
//!
//! 1. pre-evaluator guard fails            -> `inapplicable`
//! 2. no test references the criteria      -> `noTestCoverage`
//! 3. matched tests produced zero cases    -> `noResults`
//! 4. custom evaluator present             -> the status it chooses
//! 5. default severity-precedence rule     -> `failed | cantTell | passed | ...`
//!
//! Evaluation happens once; repeating it against an unchanged collection is
//! a no-op and leaves the terminal status untouched.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::case::Case;
use crate::core::collection::TestCollection;
use crate::core::guidelines::GuidelineRegistry;
use crate::core::identifiers::CriterionId;
use crate::core::identifiers::GuidelineFamily;
use crate::core::identifiers::TechniqueId;
use crate::core::identifiers::TestName;
use crate::core::status::CaseStatus;
use crate::core::status::CriterionStatus;
use crate::core::status::aggregate_statuses;
use crate::core::test::Test;

// ============================================================================
// SECTION: Evaluator Hooks
// ============================================================================

/// Custom status computation over the matched tests.
///
/// Returning `None` means the evaluator declined to set a terminal status;
/// the criteria stays `pending` and display consumers treat it as
/// `noResults`.
pub type CriteriaEvaluator = Box<dyn Fn(&[&Test]) -> Option<CriterionStatus> + Send + Sync>;

/// Guard consulted before any test is inspected.
///
/// Returning `false` forces the criteria to `inapplicable` and skips
/// evaluation entirely.
pub type CriteriaPreEvaluator = Box<dyn Fn(&TestCollection) -> bool + Send + Sync>;

// ============================================================================
// SECTION: Criterion Totals
// ============================================================================

/// Case counts by status plus the grand total.
///
/// # Invariants
/// - `cases` equals the sum of the five per-status counts.
/// - Reconciles exactly with the criteria's results buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionTotals {
    /// Count of untested cases.
    pub untested: usize,
    /// Count of passed cases.
    pub passed: usize,
    /// Count of failed cases.
    pub failed: usize,
    /// Count of undecided cases.
    pub cant_tell: usize,
    /// Count of inapplicable cases.
    pub inapplicable: usize,
    /// Total case count across all statuses.
    pub cases: usize,
}

impl CriterionTotals {
    /// Adds one case status to the tally.
    pub const fn tally(&mut self, status: CaseStatus) {
        match status {
            CaseStatus::Untested => self.untested += 1,
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Failed => self.failed += 1,
            CaseStatus::CantTell => self.cant_tell += 1,
            CaseStatus::Inapplicable => self.inapplicable += 1,
        }
        self.cases += 1;
    }
}

// ============================================================================
// SECTION: Success Criteria
// ============================================================================

/// One guideline criterion and the aggregation state built over a run.
///
/// # Invariants
/// - `techniques` is fixed at construction (resolved from the registry).
/// - `status` moves from `pending` to at most one terminal value.
/// - `results` buckets hold clones of matched cases keyed by conclusion label.
pub struct SuccessCriteria {
    /// Guideline family the criteria belongs to.
    family: GuidelineFamily,
    /// Criterion identifier within the family.
    criterion: CriterionId,
    /// Technique identifiers linked to the criteria.
    techniques: BTreeSet<TechniqueId>,
    /// Names of the matched tests, resolved by `register_tests`.
    matched: Vec<TestName>,
    /// Conclusion label -> cases bucketed under it.
    results: BTreeMap<String, Vec<Case>>,
    /// Current status; `pending` until evaluation reaches a terminal state.
    status: CriterionStatus,
    /// Set once evaluation has run, regardless of the outcome.
    evaluated: bool,
    /// Optional custom status computation.
    evaluator: Option<CriteriaEvaluator>,
    /// Optional guard that can skip evaluation entirely.
    pre_evaluator: Option<CriteriaPreEvaluator>,
}

impl SuccessCriteria {
    /// Creates a criteria with an explicit technique set.
    #[must_use]
    pub const fn new(
        family: GuidelineFamily,
        criterion: CriterionId,
        techniques: BTreeSet<TechniqueId>,
    ) -> Self {
        Self {
            family,
            criterion,
            techniques,
            matched: Vec::new(),
            results: BTreeMap::new(),
            status: CriterionStatus::Pending,
            evaluated: false,
            evaluator: None,
            pre_evaluator: None,
        }
    }

    /// Creates a criteria with techniques resolved from the registry.
    ///
    /// Returns `None` when the registry has no entry for the criterion.
    #[must_use]
    pub fn from_registry(
        registry: &GuidelineRegistry,
        family: &GuidelineFamily,
        criterion: &CriterionId,
    ) -> Option<Self> {
        let techniques = registry.techniques(family, criterion)?.clone();
        Some(Self::new(family.clone(), criterion.clone(), techniques))
    }

    /// Installs a custom evaluator.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: CriteriaEvaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Installs a pre-evaluator guard.
    #[must_use]
    pub fn with_pre_evaluator(mut self, pre_evaluator: CriteriaPreEvaluator) -> Self {
        self.pre_evaluator = Some(pre_evaluator);
        self
    }

    /// Returns the qualified criteria name, for example `wcag:1.1.1`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}:{}", self.family, self.criterion)
    }

    /// Returns the guideline family.
    #[must_use]
    pub const fn family(&self) -> &GuidelineFamily {
        &self.family
    }

    /// Returns the criterion identifier.
    #[must_use]
    pub const fn criterion(&self) -> &CriterionId {
        &self.criterion
    }

    /// Returns the technique set the criteria matches against.
    #[must_use]
    pub const fn techniques(&self) -> &BTreeSet<TechniqueId> {
        &self.techniques
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> CriterionStatus {
        self.status
    }

    /// Returns the names of the matched tests.
    #[must_use]
    pub fn matched(&self) -> &[TestName] {
        &self.matched
    }

    /// Returns the conclusion buckets.
    #[must_use]
    pub const fn results(&self) -> &BTreeMap<String, Vec<Case>> {
        &self.results
    }

    /// Returns the ordered subsequence of `collection` named in `required`.
    #[must_use]
    pub fn filter_tests<'a>(
        &self,
        collection: &'a TestCollection,
        required: &[TestName],
    ) -> Vec<&'a Test> {
        collection
            .iter()
            .filter(|test| required.contains(test.name()))
            .collect()
    }

    /// Resolves the matched test subset by technique intersection.
    ///
    /// A test matches when its membership entry for this family and criterion
    /// shares at least one technique with the criteria.
    pub fn register_tests(&mut self, collection: &TestCollection) {
        self.matched = collection
            .iter()
            .filter(|test| {
                test.membership(&self.family, &self.criterion)
                    .is_some_and(|entry| entry.intersects(&self.techniques))
            })
            .map(|test| test.name().clone())
            .collect();
    }

    /// Appends a case to the bucket for `label`, creating it if absent.
    pub fn add_conclusion(&mut self, label: impl Into<String>, case: Case) {
        self.results.entry(label.into()).or_default().push(case);
    }

    /// Walks the evaluation ladder to a terminal status.
    ///
    /// Must be called after the owning collection reaches `complete` (or, in
    /// synchronous unit fixtures, once the tests hold their final cases).
    /// Calling it again is a no-op.
    pub fn evaluate(&mut self, collection: &TestCollection) {
        if self.evaluated {
            return;
        }
        self.evaluated = true;

        if let Some(guard) = &self.pre_evaluator
            && !guard(collection)
        {
            self.status = CriterionStatus::Inapplicable;
            return;
        }

        let matched: Vec<&Test> = self.filter_tests(collection, &self.matched);
        if matched.is_empty() {
            self.status = CriterionStatus::NoTestCoverage;
            return;
        }

        let cases: Vec<Case> = matched
            .iter()
            .flat_map(|test| test.cases().iter().cloned())
            .collect();
        if cases.is_empty() {
            self.status = CriterionStatus::NoResults;
            return;
        }
        for case in &cases {
            self.add_conclusion(case.status().label(), case.clone());
        }

        if let Some(evaluator) = &self.evaluator {
            if let Some(status) = evaluator(&matched) {
                self.status = status;
            }
            return;
        }

        let aggregate = aggregate_statuses(cases.iter().map(Case::status));
        self.status = CriterionStatus::from(aggregate);
    }

    /// Computes case counts by status plus the grand total.
    ///
    /// Reconciles exactly with the results buckets filled at evaluation time;
    /// before evaluation (or on the short-circuit ladder arms) all counts are
    /// zero.
    #[must_use]
    pub fn totals(&self) -> CriterionTotals {
        let mut totals = CriterionTotals::default();
        for cases in self.results.values() {
            for case in cases {
                totals.tally(case.status());
            }
        }
        totals
    }
}

impl fmt::Debug for SuccessCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuccessCriteria")
            .field("name", &self.name())
            .field("techniques", &self.techniques)
            .field("matched", &self.matched)
            .field("status", &self.status)
            .finish()
    }
}
