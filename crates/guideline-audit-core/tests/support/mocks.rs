// crates/guideline-audit-core/tests/support/mocks.rs
// ============================================================================
// Module: Engine Test Mocks
// Description: Fixture documents, predicates, and catalogs for engine tests.
// ============================================================================
//! ## Overview
//! In-memory collaborators used by the engine integration tests: a static
//! document, scripted assessment predicates, and a map-backed catalog.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Shared across test binaries; test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use guideline_audit_core::Assessment;
use guideline_audit_core::AssessmentCatalog;
use guideline_audit_core::AssessmentError;
use guideline_audit_core::AssessmentMeta;
use guideline_audit_core::AssessmentScope;
use guideline_audit_core::Case;
use guideline_audit_core::CaseSink;
use guideline_audit_core::CaseStatus;
use guideline_audit_core::CriterionId;
use guideline_audit_core::CriterionMembership;
use guideline_audit_core::DocumentQuery;
use guideline_audit_core::GuidelineFamily;
use guideline_audit_core::GuidelineMembership;
use guideline_audit_core::NodeRef;
use guideline_audit_core::TestBinding;

// ========================================================================
// Fixture Document
// ========================================================================

/// Static document whose selector matches are configured up front.
pub struct StaticDoc {
    /// Selector -> matching nodes, in document order.
    matches: BTreeMap<String, Vec<NodeRef>>,
}

impl StaticDoc {
    /// Creates a document with no selector matches.
    pub fn empty() -> Self {
        Self {
            matches: BTreeMap::new(),
        }
    }

    /// Registers `count` synthetic matches for a selector.
    pub fn with_matches(mut self, selector: &str, count: usize) -> Self {
        let nodes = (0..count)
            .map(|index| NodeRef::new(format!("node:{selector}:{index}")))
            .collect();
        self.matches.insert(selector.to_string(), nodes);
        self
    }
}

impl DocumentQuery for StaticDoc {
    fn root(&self) -> NodeRef {
        NodeRef::new("doc:root")
    }

    fn scry(&self, selector: &str, _scope: &NodeRef) -> Vec<NodeRef> {
        self.matches.get(selector).cloned().unwrap_or_default()
    }

    fn tag(&self, _node: &NodeRef) -> Option<String> {
        None
    }

    fn attribute(&self, _node: &NodeRef, _name: &str) -> Option<String> {
        None
    }

    fn text(&self, _node: &NodeRef) -> String {
        String::new()
    }

    fn children(&self, _node: &NodeRef) -> Vec<NodeRef> {
        Vec::new()
    }
}

// ========================================================================
// Scripted Predicates
// ========================================================================

/// Builds the `wcag:1.1.1` membership map used across fixtures.
pub fn wcag_111_membership() -> GuidelineMembership {
    let mut criteria = BTreeMap::new();
    criteria.insert(
        CriterionId::new("1.1.1"),
        CriterionMembership::from_techniques(["F65", "G74", "H24"]),
    );
    let mut families = BTreeMap::new();
    families.insert(GuidelineFamily::new("wcag"), criteria);
    families
}

/// Predicate that reports a scripted list of statuses, one case each.
pub struct EmitCases {
    /// Statuses reported in order, one case per status.
    statuses: Vec<CaseStatus>,
    /// Scope binding advertised in the meta.
    binding: Option<TestBinding>,
    /// Guideline membership advertised in the meta.
    guidelines: GuidelineMembership,
}

impl EmitCases {
    /// Creates a custom-bound predicate reporting the given statuses.
    pub fn new(statuses: Vec<CaseStatus>) -> Self {
        Self {
            statuses,
            binding: None,
            guidelines: GuidelineMembership::new(),
        }
    }

    /// Advertises a selector binding.
    pub fn selector_bound(mut self, selector: &str) -> Self {
        self.binding = Some(TestBinding::Selector {
            selector: selector.to_string(),
        });
        self
    }

    /// Advertises guideline membership.
    pub fn with_guidelines(mut self, guidelines: GuidelineMembership) -> Self {
        self.guidelines = guidelines;
        self
    }
}

#[async_trait]
impl Assessment for EmitCases {
    fn meta(&self) -> AssessmentMeta {
        AssessmentMeta {
            binding: self.binding.clone(),
            options: Default::default(),
            guidelines: self.guidelines.clone(),
        }
    }

    async fn run(
        &self,
        _query: &dyn DocumentQuery,
        scope: AssessmentScope,
        sink: CaseSink,
    ) -> Result<(), AssessmentError> {
        match scope {
            AssessmentScope::Nodes(nodes) => {
                // One case per pre-resolved node, cycling the scripted list.
                for (node, status) in nodes.into_iter().zip(self.statuses.iter().cycle()) {
                    sink.report(Case::for_element(node, *status));
                }
            }
            AssessmentScope::Document(_) => {
                for status in &self.statuses {
                    sink.report(Case::new(*status));
                }
            }
        }
        Ok(())
    }
}

/// Predicate that fails with an assessment error after reporting nothing.
pub struct FailingPredicate;

#[async_trait]
impl Assessment for FailingPredicate {
    fn meta(&self) -> AssessmentMeta {
        AssessmentMeta::default()
    }

    async fn run(
        &self,
        _query: &dyn DocumentQuery,
        _scope: AssessmentScope,
        _sink: CaseSink,
    ) -> Result<(), AssessmentError> {
        Err(AssessmentError::Other("fixture blew up".to_string()))
    }
}

/// Predicate that reports some cases and then never completes.
pub struct StalledPredicate {
    /// Statuses reported before stalling.
    statuses: Vec<CaseStatus>,
}

impl StalledPredicate {
    /// Creates a predicate that stalls after reporting the given statuses.
    pub fn new(statuses: Vec<CaseStatus>) -> Self {
        Self {
            statuses,
        }
    }
}

#[async_trait]
impl Assessment for StalledPredicate {
    fn meta(&self) -> AssessmentMeta {
        AssessmentMeta::default()
    }

    async fn run(
        &self,
        _query: &dyn DocumentQuery,
        _scope: AssessmentScope,
        sink: CaseSink,
    ) -> Result<(), AssessmentError> {
        for status in &self.statuses {
            sink.report(Case::new(*status));
        }
        std::future::pending::<()>().await;
        Ok(())
    }
}

// ========================================================================
// Fixture Catalog
// ========================================================================

/// Map-backed assessment catalog for tests.
#[derive(Default)]
pub struct FixtureCatalog {
    /// Assessments keyed by name, in name order.
    assessments: BTreeMap<String, Arc<dyn Assessment>>,
}

impl FixtureCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an assessment under a name.
    pub fn register(mut self, name: &str, assessment: Arc<dyn Assessment>) -> Self {
        self.assessments.insert(name.to_string(), assessment);
        self
    }
}

impl AssessmentCatalog for FixtureCatalog {
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.assessments.keys().map(String::as_str))
    }

    fn get(&self, name: &str) -> Option<Arc<dyn Assessment>> {
        self.assessments.get(name).cloned()
    }
}
