// crates/guideline-audit-core/src/runtime/events.rs
// ============================================================================
// Module: Run Lifecycle Hooks
// Description: Fixed hook record fired by the run loop.
// Purpose: Replace duck-typed listener registration with a typed set of named
//          events with fixed payload shapes and documented defaults.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Every hook is a no-op by default. Emission is synchronous, on the single
//! cooperative thread, in the documented lifecycle order:
//!
//! - `pre_filter(test)` may veto a test before it runs
//! - `case_resolve(case, test)` fires once per recorded case
//! - `test_complete(test)` fires once per test, after all of its cases
//! - `test_collection_complete(collection)` fires once, after every test
//! - `success_criteria_evaluated(criteria)` fires once per criteria terminal
//! - `complete(collection)` fires last

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::core::case::Case;
use crate::core::collection::TestCollection;
use crate::core::criteria::SuccessCriteria;
use crate::core::test::Test;

// ============================================================================
// SECTION: Hook Signatures
// ============================================================================

/// Veto hook consulted before a test runs; returning false skips it.
pub type PreFilterHook = Box<dyn FnMut(&Test) -> bool + Send>;
/// Fired once per case as it is recorded on its test.
pub type CaseResolveHook = Box<dyn FnMut(&Case, &Test) + Send>;
/// Fired once per test after all of its cases are recorded.
pub type TestCompleteHook = Box<dyn FnMut(&Test) + Send>;
/// Fired once per run over the whole collection.
pub type CollectionHook = Box<dyn FnMut(&TestCollection) + Send>;
/// Fired once per criteria when it reaches a terminal status.
pub type CriteriaEvaluatedHook = Box<dyn FnMut(&SuccessCriteria) + Send>;

// ============================================================================
// SECTION: Run Hooks
// ============================================================================

/// Lifecycle callbacks for one run; every field defaults to a no-op.
///
/// # Invariants
/// - Hooks are fired synchronously in lifecycle order; a hook observing a
///   test or collection sees its state at emission time.
#[derive(Default)]
pub struct RunHooks {
    /// May veto running a given test.
    pre_filter: Option<PreFilterHook>,
    /// Fired once per case as it is produced.
    case_resolve: Option<CaseResolveHook>,
    /// Fired once a test finishes producing cases.
    test_complete: Option<TestCompleteHook>,
    /// Fired once every test has finished.
    test_collection_complete: Option<CollectionHook>,
    /// Fired once per criteria reaching a terminal status.
    success_criteria_evaluated: Option<CriteriaEvaluatedHook>,
    /// Final signal, fired after criteria evaluation.
    complete: Option<CollectionHook>,
}

impl RunHooks {
    /// Creates the default hook set (all no-ops).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the pre-filter veto hook.
    #[must_use]
    pub fn on_pre_filter(mut self, hook: impl FnMut(&Test) -> bool + Send + 'static) -> Self {
        self.pre_filter = Some(Box::new(hook));
        self
    }

    /// Installs the per-case hook.
    #[must_use]
    pub fn on_case_resolve(mut self, hook: impl FnMut(&Case, &Test) + Send + 'static) -> Self {
        self.case_resolve = Some(Box::new(hook));
        self
    }

    /// Installs the per-test completion hook.
    #[must_use]
    pub fn on_test_complete(mut self, hook: impl FnMut(&Test) + Send + 'static) -> Self {
        self.test_complete = Some(Box::new(hook));
        self
    }

    /// Installs the collection completion hook.
    #[must_use]
    pub fn on_test_collection_complete(
        mut self,
        hook: impl FnMut(&TestCollection) + Send + 'static,
    ) -> Self {
        self.test_collection_complete = Some(Box::new(hook));
        self
    }

    /// Installs the per-criteria evaluation hook.
    #[must_use]
    pub fn on_success_criteria_evaluated(
        mut self,
        hook: impl FnMut(&SuccessCriteria) + Send + 'static,
    ) -> Self {
        self.success_criteria_evaluated = Some(Box::new(hook));
        self
    }

    /// Installs the final completion hook.
    #[must_use]
    pub fn on_complete(mut self, hook: impl FnMut(&TestCollection) + Send + 'static) -> Self {
        self.complete = Some(Box::new(hook));
        self
    }

    /// Consults the veto hook; absent means every test runs.
    pub(crate) fn fire_pre_filter(&mut self, test: &Test) -> bool {
        self.pre_filter.as_mut().is_none_or(|hook| hook(test))
    }

    /// Fires the per-case hook.
    pub(crate) fn fire_case_resolve(&mut self, case: &Case, test: &Test) {
        if let Some(hook) = self.case_resolve.as_mut() {
            hook(case, test);
        }
    }

    /// Fires the per-test completion hook.
    pub(crate) fn fire_test_complete(&mut self, test: &Test) {
        if let Some(hook) = self.test_complete.as_mut() {
            hook(test);
        }
    }

    /// Fires the collection completion hook.
    pub(crate) fn fire_test_collection_complete(&mut self, collection: &TestCollection) {
        if let Some(hook) = self.test_collection_complete.as_mut() {
            hook(collection);
        }
    }

    /// Fires the per-criteria evaluation hook.
    pub(crate) fn fire_success_criteria_evaluated(&mut self, criteria: &SuccessCriteria) {
        if let Some(hook) = self.success_criteria_evaluated.as_mut() {
            hook(criteria);
        }
    }

    /// Fires the final completion hook.
    pub(crate) fn fire_complete(&mut self, collection: &TestCollection) {
        if let Some(hook) = self.complete.as_mut() {
            hook(collection);
        }
    }
}

impl fmt::Debug for RunHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunHooks")
            .field("pre_filter", &self.pre_filter.is_some())
            .field("case_resolve", &self.case_resolve.is_some())
            .field("test_complete", &self.test_complete.is_some())
            .field(
                "test_collection_complete",
                &self.test_collection_complete.is_some(),
            )
            .field(
                "success_criteria_evaluated",
                &self.success_criteria_evaluated.is_some(),
            )
            .field("complete", &self.complete.is_some())
            .finish()
    }
}
