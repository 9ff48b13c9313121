// crates/guideline-audit-core/src/core/collection.rs
// ============================================================================
// Module: Test Collection
// Description: Ordered, name-keyed set of tests with a run-state machine.
// Purpose: Hold the tests of one run, enforce name uniqueness, and gate the
//          idle -> running -> complete lifecycle.
// Dependencies: crate::core::{case, error, identifiers, status, test}, serde
// ============================================================================

//! ## Overview
//! A [`TestCollection`] preserves insertion order for iteration and offers
//! name lookup for criteria resolution. It transitions through
//! `idle -> running -> complete` exactly once per run; the runtime module
//! drives the transition and the per-test completion counting.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::error::AuditError;
use crate::core::identifiers::NodeRef;
use crate::core::identifiers::TestName;
use crate::core::status::CaseStatus;
use crate::core::test::Test;
use crate::core::test::TestSpec;

// ============================================================================
// SECTION: Run State
// ============================================================================

/// Lifecycle state of a collection.
///
/// # Invariants
/// - Transitions occur in order and exactly once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    /// Tests may still be added; no run has started.
    Idle,
    /// A run is executing tests.
    Running,
    /// Every test has completed (normally or via forced timeout).
    Complete,
}

impl Default for RunState {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Complete => "complete",
        };
        f.write_str(label)
    }
}

// ============================================================================
// SECTION: Test Collection
// ============================================================================

/// Ordered, name-keyed set of tests.
///
/// # Invariants
/// - Test names are unique within the collection.
/// - Iteration order equals insertion order; name lookup is O(log n).
/// - During a run the collection is append-only: new cases and status
///   transitions, never restructuring.
#[derive(Debug, Default)]
pub struct TestCollection {
    /// Tests in insertion order.
    tests: Vec<Test>,
    /// Name -> position index for lookup.
    index: BTreeMap<TestName, usize>,
    /// Lifecycle state.
    state: RunState,
    /// Document scope the run is bound to, when known.
    scope: Option<NodeRef>,
}

impl TestCollection {
    /// Creates an empty, idle collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tests: Vec::new(),
            index: BTreeMap::new(),
            state: RunState::Idle,
            scope: None,
        }
    }

    /// Creates an empty collection bound to a document scope.
    #[must_use]
    pub const fn with_scope(scope: NodeRef) -> Self {
        Self {
            tests: Vec::new(),
            index: BTreeMap::new(),
            state: RunState::Idle,
            scope: Some(scope),
        }
    }

    /// Returns the document scope the collection is bound to, if any.
    #[must_use]
    pub const fn scope(&self) -> Option<&NodeRef> {
        self.scope.as_ref()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Adds a test under its name.
    ///
    /// # Errors
    /// Returns [`AuditError::DuplicateTestName`] when the name is taken, or
    /// [`AuditError::CollectionNotIdle`] once a run has started.
    pub fn add(&mut self, test: Test) -> Result<(), AuditError> {
        if self.state != RunState::Idle {
            return Err(AuditError::CollectionNotIdle {
                state: self.state.to_string(),
            });
        }
        if self.index.contains_key(test.name()) {
            return Err(AuditError::DuplicateTestName {
                name: test.name().clone(),
            });
        }
        self.index.insert(test.name().clone(), self.tests.len());
        self.tests.push(test);
        Ok(())
    }

    /// Instantiates a test from a raw definition and adds it.
    ///
    /// # Errors
    /// Same conditions as [`TestCollection::add`].
    pub fn add_spec(&mut self, name: TestName, spec: TestSpec) -> Result<(), AuditError> {
        self.add(Test::from_spec(name, spec))
    }

    /// Returns the test registered under `name`, if any.
    #[must_use]
    pub fn find(&self, name: &TestName) -> Option<&Test> {
        self.index.get(name).map(|position| &self.tests[*position])
    }

    /// Returns the tests whose derived status is in `statuses`, in order.
    #[must_use]
    pub fn find_by_status(&self, statuses: &[CaseStatus]) -> Vec<&Test> {
        self.tests
            .iter()
            .filter(|test| statuses.contains(&test.status()))
            .collect()
    }

    /// Iterates over the tests in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Test> {
        self.tests.iter()
    }

    /// Returns the number of tests in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns true when the collection holds no tests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Moves the collection from idle to running.
    ///
    /// # Errors
    /// Returns [`AuditError::CollectionNotIdle`] when a run already started.
    pub(crate) fn begin_run(&mut self) -> Result<(), AuditError> {
        if self.state != RunState::Idle {
            return Err(AuditError::CollectionNotIdle {
                state: self.state.to_string(),
            });
        }
        self.state = RunState::Running;
        Ok(())
    }

    /// Moves the collection from running to complete.
    pub(crate) const fn finish_run(&mut self) {
        self.state = RunState::Complete;
    }

    /// Returns the test at `position` for the run loop.
    pub(crate) fn test_at(&self, position: usize) -> Option<&Test> {
        self.tests.get(position)
    }

    /// Returns mutable access to the test at `position` for the run loop.
    pub(crate) fn test_mut(&mut self, position: usize) -> Option<&mut Test> {
        self.tests.get_mut(position)
    }
}

impl<'a> IntoIterator for &'a TestCollection {
    type Item = &'a Test;
    type IntoIter = std::slice::Iter<'a, Test>;

    fn into_iter(self) -> Self::IntoIter {
        self.tests.iter()
    }
}
