// crates/guideline-audit-core/src/runtime/runner.rs
// ============================================================================
// Module: Run Orchestration
// Description: Drives a test collection to completion and evaluates criteria.
// Purpose: Resolve assessments, execute every test with isolation and
//          timeouts, and fire lifecycle hooks in contract order.
// Dependencies: crate::{core, interfaces, runtime::events}, tokio
// ============================================================================

//! ## Overview
//! The run loop executes each test's predicate on the single cooperative
//! thread. Suspension points are exactly: awaiting a predicate's completion
//! and, when configured, the per-test timeout. A stalled predicate is forced
//! complete with whatever cases it produced; a failing predicate is converted
//! into one `cantTell` case. Completion is driven by an outstanding-test
//! counter decremented exactly once per test, guarded by the per-test
//! completed flag.
//!
//! Hook order per run: `pre_filter` (per test) -> `case_resolve` (per case)
//! -> `test_complete` (per test) -> `test_collection_complete` ->
//! `success_criteria_evaluated` (per criteria) -> `complete`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use crate::core::case::Case;
use crate::core::collection::TestCollection;
use crate::core::criteria::SuccessCriteria;
use crate::core::error::AuditError;
use crate::core::guidelines::GuidelineRegistry;
use crate::core::identifiers::GuidelineFamily;
use crate::core::identifiers::NodeRef;
use crate::core::identifiers::TestName;
use crate::core::status::CaseStatus;
use crate::core::test::Test;
use crate::core::test::TestBinding;
use crate::core::test::TestSpec;
use crate::interfaces::Assessment;
use crate::interfaces::AssessmentCatalog;
use crate::interfaces::AssessmentScope;
use crate::interfaces::CaseSink;
use crate::interfaces::DocumentQuery;
use crate::runtime::events::RunHooks;

// ============================================================================
// SECTION: Run Options
// ============================================================================

/// Caller-supplied configuration for one run.
///
/// # Invariants
/// - Every field is optional with a documented default; an empty record runs
///   the whole catalog against the document root with no timeout.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Assessment names to run; defaults to every name in the catalog.
    pub assessments: Option<Vec<String>>,
    /// Root scope for the run; defaults to the document root.
    pub scope: Option<NodeRef>,
    /// Per-test timeout; defaults to none (tests may run unbounded).
    pub test_timeout: Option<Duration>,
}

/// Execution context shared by every test in one run.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    /// Document-query collaborator for scope resolution.
    pub query: &'a dyn DocumentQuery,
    /// Per-test timeout, when configured.
    pub test_timeout: Option<Duration>,
}

// ============================================================================
// SECTION: Guideline Setup
// ============================================================================

/// Per-family setup hook, invoked once per run before tests execute.
///
/// The hook builds the criteria it wants evaluated; the engine evaluates
/// them after the collection completes and fires
/// `success_criteria_evaluated` once each reaches a terminal status.
pub trait GuidelineSetup: Send + Sync {
    /// Returns the family this setup belongs to.
    fn family(&self) -> GuidelineFamily;

    /// Builds the criteria to evaluate against the collection.
    fn setup(&self, registry: &GuidelineRegistry) -> Vec<SuccessCriteria>;
}

/// Default setup deriving one criteria per registry entry of a family.
///
/// # Invariants
/// - Criteria are produced in criterion-id order.
#[derive(Debug, Clone)]
pub struct RegistryGuideline {
    /// Family whose registry entries become criteria.
    family: GuidelineFamily,
}

impl RegistryGuideline {
    /// Creates a setup for the given family.
    #[must_use]
    pub const fn new(family: GuidelineFamily) -> Self {
        Self {
            family,
        }
    }
}

impl GuidelineSetup for RegistryGuideline {
    fn family(&self) -> GuidelineFamily {
        self.family.clone()
    }

    fn setup(&self, registry: &GuidelineRegistry) -> Vec<SuccessCriteria> {
        registry
            .criteria(&self.family)
            .map(|(criterion, entry)| {
                SuccessCriteria::new(
                    self.family.clone(),
                    criterion.clone(),
                    entry.techniques.clone(),
                )
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Collection Run Loop
// ============================================================================

impl TestCollection {
    /// Runs every contained test and drives criteria evaluation.
    ///
    /// Tests execute in insertion order; each predicate is isolated, so a
    /// failure or timeout in one never affects another. The collection
    /// reaches `complete` exactly once, after the last test has finished
    /// normally or been forced complete by the timeout.
    ///
    /// # Errors
    /// Returns [`AuditError::CollectionNotIdle`] when a run already started.
    pub async fn run(
        &mut self,
        ctx: RunContext<'_>,
        criteria: &mut [SuccessCriteria],
        hooks: &mut RunHooks,
    ) -> Result<(), AuditError> {
        self.begin_run()?;
        let mut outstanding = self.len();

        for position in 0..self.len() {
            let produced = match self.test_at(position) {
                Some(test) if hooks.fire_pre_filter(test) => {
                    match test.predicate().cloned() {
                        Some(predicate) => {
                            let scope = self.resolve_scope(position, ctx.query);
                            execute_predicate(predicate, ctx, scope).await
                        }
                        // Fixture tests without a predicate keep whatever
                        // cases were added directly.
                        None => Vec::new(),
                    }
                }
                // Vetoed tests complete without running.
                _ => Vec::new(),
            };

            let (recorded_from, first_transition) = {
                let Some(test) = self.test_mut(position) else {
                    continue;
                };
                let recorded_from = test.cases().len();
                for case in produced {
                    test.add_case(case);
                }
                (recorded_from, test.mark_complete())
            };

            if let Some(test) = self.test_at(position) {
                for case in &test.cases()[recorded_from..] {
                    hooks.fire_case_resolve(case, test);
                }
                if first_transition {
                    outstanding -= 1;
                    hooks.fire_test_complete(test);
                }
            }
        }

        if outstanding == 0 {
            self.finish_run();
        }
        hooks.fire_test_collection_complete(self);

        for criterion in criteria.iter_mut() {
            criterion.register_tests(self);
            criterion.evaluate(self);
            hooks.fire_success_criteria_evaluated(criterion);
        }
        hooks.fire_complete(self);
        Ok(())
    }

    /// Resolves the scope handed to the predicate of the test at `position`.
    fn resolve_scope(&self, position: usize, query: &dyn DocumentQuery) -> AssessmentScope {
        let root = self
            .scope()
            .cloned()
            .unwrap_or_else(|| query.root());
        match self.test_at(position).map(Test::binding) {
            Some(TestBinding::Selector { selector }) => {
                AssessmentScope::Nodes(query.scry(selector, &root))
            }
            _ => AssessmentScope::Document(root),
        }
    }
}

/// Runs one predicate with isolation and the optional timeout.
///
/// The returned cases are whatever the predicate reported before finishing,
/// failing, or being forced complete. A predicate error appends a single
/// `cantTell` case carrying the error message.
async fn execute_predicate(
    predicate: Arc<dyn Assessment>,
    ctx: RunContext<'_>,
    scope: AssessmentScope,
) -> Vec<Case> {
    let (sink, mut receiver) = CaseSink::channel();
    let invocation = predicate.run(ctx.query, scope, sink);
    let outcome = match ctx.test_timeout {
        Some(limit) => tokio::time::timeout(limit, invocation).await,
        None => Ok(invocation.await),
    };

    // The predicate future (and its sink) is gone by now, so the channel is
    // closed and holds exactly the cases reported before completion.
    let mut produced = Vec::new();
    while let Ok(case) = receiver.try_recv() {
        produced.push(case);
    }
    match outcome {
        Ok(Ok(())) | Err(_) => {}
        Ok(Err(error)) => {
            produced.push(Case::new(CaseStatus::CantTell).with_message(error.to_string()));
        }
    }
    produced
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Outcome of a completed run.
///
/// # Invariants
/// - `collection` is in the `complete` state.
/// - Every criteria has been evaluated (terminal or pending-by-evaluator).
#[derive(Debug)]
pub struct RunOutcome {
    /// The completed collection with all recorded cases.
    pub collection: TestCollection,
    /// Evaluated criteria in setup order.
    pub criteria: Vec<SuccessCriteria>,
}

/// Composes a run from a catalog, a document, and guideline wiring.
///
/// # Invariants
/// - The assessment set of a run is a pure function of the catalog and the
///   requested names; nothing is resolved from ambient state.
pub struct AuditRun<'a> {
    /// Assessment catalog supplying predicates by name.
    catalog: &'a dyn AssessmentCatalog,
    /// Document-query collaborator.
    query: &'a dyn DocumentQuery,
    /// Read-only guideline configuration.
    registry: &'a GuidelineRegistry,
    /// Guideline setups to wire before tests execute.
    guidelines: Vec<Box<dyn GuidelineSetup>>,
}

impl<'a> AuditRun<'a> {
    /// Creates an orchestrator over the given collaborators.
    #[must_use]
    pub const fn new(
        catalog: &'a dyn AssessmentCatalog,
        query: &'a dyn DocumentQuery,
        registry: &'a GuidelineRegistry,
    ) -> Self {
        Self {
            catalog,
            query,
            registry,
            guidelines: Vec::new(),
        }
    }

    /// Registers a guideline setup hook.
    #[must_use]
    pub fn with_guideline(mut self, setup: Box<dyn GuidelineSetup>) -> Self {
        self.guidelines.push(setup);
        self
    }

    /// Resolves assessments, builds the collection, and drives it to
    /// completion with the caller's hooks forwarded verbatim.
    ///
    /// # Errors
    /// Returns [`AuditError::UnknownAssessment`] when an explicitly requested
    /// name is missing from the catalog, or [`AuditError::DuplicateTestName`]
    /// when the request lists a name twice.
    pub async fn run(
        &self,
        options: RunOptions,
        mut hooks: RunHooks,
    ) -> Result<RunOutcome, AuditError> {
        let names: Vec<String> = match &options.assessments {
            Some(requested) => requested.clone(),
            None => self.catalog.names().map(str::to_string).collect(),
        };

        let scope = options.scope.clone().unwrap_or_else(|| self.query.root());
        let mut collection = TestCollection::with_scope(scope);
        for name in names {
            let assessment =
                self.catalog
                    .get(&name)
                    .ok_or_else(|| AuditError::UnknownAssessment {
                        name: name.clone(),
                    })?;
            let meta = assessment.meta();
            collection.add_spec(
                TestName::new(name),
                TestSpec {
                    binding: meta.binding,
                    options: meta.options,
                    guidelines: meta.guidelines,
                    predicate: Some(assessment),
                },
            )?;
        }

        // Guideline setups run once per run, before any test executes.
        let mut criteria: Vec<SuccessCriteria> = self
            .guidelines
            .iter()
            .flat_map(|setup| setup.setup(self.registry))
            .collect();

        let ctx = RunContext {
            query: self.query,
            test_timeout: options.test_timeout,
        };
        collection.run(ctx, &mut criteria, &mut hooks).await?;

        Ok(RunOutcome {
            collection,
            criteria,
        })
    }
}
