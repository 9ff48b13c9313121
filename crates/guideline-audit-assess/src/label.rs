// crates/guideline-audit-assess/src/label.rs
// ============================================================================
// Module: Label Presence Assessment
// Description: Checks that form controls carry an associated label.
// Purpose: Report one case per input element, passed when a label names it.
// Dependencies: guideline-audit-core, async-trait
// ============================================================================

//! ## Overview
//! An input is labelled when a `label` element references its `id` through a
//! `for` attribute, or when a `label` element wraps it; either way the label
//! must carry readable text. Inputs of purely interactive types (hidden,
//! submit, and friends) are reported inapplicable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use guideline_audit_core::Assessment;
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

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Registry name of this assessment.
pub const LABEL_PRESENT_NAME: &str = "label-present";

/// Input types that never need a visible label.
const SKIPPED_INPUT_TYPES: &[&str] = &["hidden", "submit", "reset", "button", "image"];

// ============================================================================
// SECTION: Assessment
// ============================================================================

/// Checks that every applicable input has an associated, readable label.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelPresent;

impl LabelPresent {
    /// Creates the assessment.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Guideline membership advertised by this assessment.
    fn guidelines() -> GuidelineMembership {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            CriterionId::new("1.3.1"),
            CriterionMembership::from_techniques(["H44"]),
        );
        criteria.insert(
            CriterionId::new("3.3.2"),
            CriterionMembership::from_techniques(["G131", "H44"]),
        );
        let mut families = BTreeMap::new();
        families.insert(GuidelineFamily::new("wcag"), criteria);
        families
    }
}

#[async_trait]
impl Assessment for LabelPresent {
    fn meta(&self) -> AssessmentMeta {
        AssessmentMeta {
            binding: Some(TestBinding::Selector {
                selector: "input".to_string(),
            }),
            options: Default::default(),
            guidelines: Self::guidelines(),
        }
    }

    async fn run(
        &self,
        query: &dyn DocumentQuery,
        scope: AssessmentScope,
        sink: CaseSink,
    ) -> Result<(), AssessmentError> {
        let inputs = match scope {
            AssessmentScope::Nodes(nodes) => nodes,
            AssessmentScope::Document(root) => query.scry("input", &root),
        };
        let labels = query.scry("label", &query.root());

        for input in inputs {
            let input_type = query
                .attribute(&input, "type")
                .unwrap_or_default()
                .to_ascii_lowercase();
            if SKIPPED_INPUT_TYPES.contains(&input_type.as_str()) {
                sink.report(
                    Case::for_element(input, CaseStatus::Inapplicable)
                        .with_rule_id(LABEL_PRESENT_NAME),
                );
                continue;
            }
            let labelled = references_by_id(query, &labels, &input)
                || wraps_directly(query, &labels, &input);
            let case = if labelled {
                Case::for_element(input, CaseStatus::Passed)
            } else {
                Case::for_element(input, CaseStatus::Failed)
                    .with_message("input has no associated label with readable text")
            };
            sink.report(case.with_rule_id(LABEL_PRESENT_NAME));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// True when a readable label targets the input's id with a `for` attribute.
fn references_by_id(query: &dyn DocumentQuery, labels: &[NodeRef], input: &NodeRef) -> bool {
    let Some(id) = query.attribute(input, "id") else {
        return false;
    };
    labels.iter().any(|label| {
        query.attribute(label, "for").as_deref() == Some(id.as_str()) && is_readable(query, label)
    })
}

/// True when a readable label element wraps the input.
fn wraps_directly(query: &dyn DocumentQuery, labels: &[NodeRef], input: &NodeRef) -> bool {
    labels
        .iter()
        .any(|label| subtree_contains(query, label, input) && is_readable(query, label))
}

/// True when the label's subtree text is non-blank.
fn is_readable(query: &dyn DocumentQuery, label: &NodeRef) -> bool {
    !query.text(label).trim().is_empty()
}

/// True when `node` appears anywhere beneath `ancestor`.
fn subtree_contains(query: &dyn DocumentQuery, ancestor: &NodeRef, node: &NodeRef) -> bool {
    query
        .children(ancestor)
        .iter()
        .any(|child| child == node || subtree_contains(query, child, node))
}
