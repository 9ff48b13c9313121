// crates/guideline-audit-assess/src/readable_text.rs
// ============================================================================
// Module: Readable Text Assessment
// Description: Checks that content elements carry non-placeholder text.
// Purpose: Report one case per heading, paragraph, and link, failing empty
//          and boilerplate content.
// Dependencies: guideline-audit-core, async-trait
// ============================================================================

//! ## Overview
//! A custom-bound check: it resolves its own candidates (headings,
//! paragraphs, links) from the document scope and fails elements whose text
//! is blank, pure punctuation, or a known placeholder phrase.

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
pub const READABLE_TEXT_NAME: &str = "readable-text";

/// Tags whose text content is assessed.
const CANDIDATE_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "a"];

/// Boilerplate phrases that carry no information on their own.
const PLACEHOLDER_PHRASES: &[&str] = &[
    "click here",
    "lorem ipsum",
    "more",
    "placeholder",
    "read more",
    "title",
    "untitled",
];

// ============================================================================
// SECTION: Assessment
// ============================================================================

/// Checks that content elements carry readable, non-placeholder text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadableText;

impl ReadableText {
    /// Creates the assessment.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Guideline membership advertised by this assessment.
    fn guidelines() -> GuidelineMembership {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            CriterionId::new("2.4.6"),
            CriterionMembership::from_techniques(["G130", "G131"]),
        );
        let mut families = BTreeMap::new();
        families.insert(GuidelineFamily::new("wcag"), criteria);
        families
    }
}

#[async_trait]
impl Assessment for ReadableText {
    fn meta(&self) -> AssessmentMeta {
        AssessmentMeta {
            binding: Some(TestBinding::Custom),
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
        let candidates = match scope {
            AssessmentScope::Nodes(nodes) => nodes,
            AssessmentScope::Document(root) => {
                let mut nodes = Vec::new();
                for tag in CANDIDATE_TAGS {
                    nodes.extend(query.scry(tag, &root));
                }
                nodes
            }
        };

        for node in candidates {
            sink.report(assess_text(query, node).with_rule_id(READABLE_TEXT_NAME));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Produces the case for one candidate element.
fn assess_text(query: &dyn DocumentQuery, node: NodeRef) -> Case {
    let text = query.text(&node).trim().to_lowercase();
    if text.is_empty() || !text.chars().any(char::is_alphanumeric) {
        return Case::for_element(node, CaseStatus::Failed)
            .with_message("element has no readable text");
    }
    if PLACEHOLDER_PHRASES.contains(&text.as_str()) {
        return Case::for_element(node, CaseStatus::Failed)
            .with_message("element text is placeholder boilerplate");
    }
    Case::for_element(node, CaseStatus::Passed)
}
