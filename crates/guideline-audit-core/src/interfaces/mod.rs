// crates/guideline-audit-core/src/interfaces/mod.rs
// ============================================================================
// Module: Audit Interfaces
// Description: Backend-agnostic interfaces for assessments and documents.
// Purpose: Define the contract surfaces the evaluation engine depends on.
// Dependencies: crate::core, async-trait, thiserror, tokio
// ============================================================================

//! ## Overview
//! Interfaces define how the engine integrates with the assessment library
//! and the document model without embedding either. Assessment predicates are
//! black boxes: given a scope and a sink they report zero or more cases and
//! signal completion by resolving. The document query collaborator owns node
//! selection and inspection; the engine itself only ever calls `scry`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::core::case::Case;
use crate::core::guidelines::GuidelineMembership;
use crate::core::identifiers::NodeRef;
use crate::core::test::TestBinding;
use crate::core::test::TestOptions;

// ============================================================================
// SECTION: Document Query
// ============================================================================

/// Node-selection and inspection capability supplied by the document model.
///
/// # Invariants
/// - `scry` returns matches in document order.
/// - The document is read-only for the duration of a run.
pub trait DocumentQuery: Send + Sync {
    /// Returns the root node of the document.
    fn root(&self) -> NodeRef;

    /// Returns the ordered sequence of nodes matching `selector` under `scope`.
    fn scry(&self, selector: &str, scope: &NodeRef) -> Vec<NodeRef>;

    /// Returns the tag name of a node, when the reference is valid.
    fn tag(&self, node: &NodeRef) -> Option<String>;

    /// Returns the value of an attribute on a node.
    fn attribute(&self, node: &NodeRef, name: &str) -> Option<String>;

    /// Returns the concatenated text content beneath a node.
    fn text(&self, node: &NodeRef) -> String;

    /// Returns the direct children of a node in document order.
    fn children(&self, node: &NodeRef) -> Vec<NodeRef>;
}

// ============================================================================
// SECTION: Case Sink
// ============================================================================

/// Handle through which a predicate reports cases to the engine.
///
/// # Invariants
/// - Cases arrive at the engine in report order.
/// - Reporting after the owning test was forcibly completed is a silent no-op.
#[derive(Clone)]
pub struct CaseSink {
    /// Channel delivering cases to the run loop.
    sender: mpsc::UnboundedSender<Case>,
}

impl CaseSink {
    /// Creates a sink and the receiving half the run loop drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Case>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
            },
            receiver,
        )
    }

    /// Reports one case.
    ///
    /// A closed channel means the test was already forced complete; the case
    /// is dropped, matching the partial-result contract for timed-out tests.
    pub fn report(&self, case: Case) {
        let _ = self.sender.send(case);
    }
}

// ============================================================================
// SECTION: Assessment Predicate
// ============================================================================

/// Errors an assessment predicate may surface.
///
/// A failed predicate never crashes the run: the engine converts the error
/// into a single `cantTell` case on the owning test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The document query rejected a selector or node reference.
    #[error("document query failure: {0}")]
    Query(String),
    /// Any other predicate-internal failure.
    #[error("assessment failure: {0}")]
    Other(String),
}

/// Scope handed to a predicate when it runs.
///
/// # Invariants
/// - Selector-bound tests receive `Nodes` (pre-resolved, in document order);
///   custom-bound tests receive `Document`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentScope {
    /// Pre-resolved node sequence for a selector-bound test.
    Nodes(Vec<NodeRef>),
    /// Raw document scope for a custom-bound test.
    Document(NodeRef),
}

/// Static description an assessment publishes about itself.
///
/// # Invariants
/// - Mirrors the fields a test is instantiated from.
#[derive(Debug, Clone, Default)]
pub struct AssessmentMeta {
    /// Scope binding the engine applies before invoking the predicate.
    pub binding: Option<TestBinding>,
    /// Default configuration forwarded to the predicate.
    pub options: TestOptions,
    /// Guideline membership for criteria resolution.
    pub guidelines: GuidelineMembership,
}

/// A pluggable check over document nodes.
///
/// Implementations may be asynchronous and report cases over time through the
/// sink; completion is signaled by the future resolving. Predicates must not
/// mutate the document.
#[async_trait]
pub trait Assessment: Send + Sync {
    /// Returns the static description of the assessment.
    fn meta(&self) -> AssessmentMeta;

    /// Inspects the scope and reports zero or more cases through the sink.
    ///
    /// # Errors
    /// Returns an [`AssessmentError`] when the check cannot be carried out;
    /// the engine records it as a single `cantTell` case.
    async fn run(
        &self,
        query: &dyn DocumentQuery,
        scope: AssessmentScope,
        sink: CaseSink,
    ) -> Result<(), AssessmentError>;
}

// ============================================================================
// SECTION: Assessment Catalog
// ============================================================================

/// Caller-constructed registry of assessments by name.
///
/// The run's assessment set is a pure function of the catalog and the
/// requested names; there is no ambient global registry.
pub trait AssessmentCatalog: Send + Sync {
    /// Iterates over registered assessment names lazily, in a stable order.
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Returns a shared handle to the assessment registered under `name`.
    fn get(&self, name: &str) -> Option<Arc<dyn Assessment>>;
}
