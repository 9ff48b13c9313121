// crates/guideline-audit-assess/src/data_table.rs
// ============================================================================
// Module: Data Table Headers Assessment
// Description: Checks that tables used for data carry header structure.
// Purpose: Report one case per table, distinguishing layout tables from data
//          tables lacking headers.
// Dependencies: guideline-audit-core, async-trait
// ============================================================================

//! ## Overview
//! A table with `th` cells passes outright. Without headers the check falls
//! back on intent signals: a `caption` or `summary` attribute declares a data
//! table and fails, a short table reads as layout and is inapplicable, and
//! anything else is reported `cantTell` for human review.

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
pub const DATA_TABLE_HEADERS_NAME: &str = "data-table-headers";

/// Row count below which an undeclared table reads as layout.
const LAYOUT_ROW_THRESHOLD: usize = 3;

// ============================================================================
// SECTION: Assessment
// ============================================================================

/// Checks that data tables carry header cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataTableHeaders;

impl DataTableHeaders {
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
            CriterionMembership::from_techniques(["H43", "H51"]),
        );
        let mut families = BTreeMap::new();
        families.insert(GuidelineFamily::new("wcag"), criteria);
        families
    }
}

#[async_trait]
impl Assessment for DataTableHeaders {
    fn meta(&self) -> AssessmentMeta {
        AssessmentMeta {
            binding: Some(TestBinding::Selector {
                selector: "table".to_string(),
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
        let tables = match scope {
            AssessmentScope::Nodes(nodes) => nodes,
            AssessmentScope::Document(root) => query.scry("table", &root),
        };

        for table in tables {
            let case = classify(query, &table);
            sink.report(case.with_rule_id(DATA_TABLE_HEADERS_NAME));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Produces the case for one table.
fn classify(query: &dyn DocumentQuery, table: &NodeRef) -> Case {
    if !query.scry("th", table).is_empty() {
        return Case::for_element(table.clone(), CaseStatus::Passed);
    }
    if declares_data(query, table) {
        return Case::for_element(table.clone(), CaseStatus::Failed)
            .with_message("data table has no header cells");
    }
    if query.scry("tr", table).len() < LAYOUT_ROW_THRESHOLD {
        return Case::for_element(table.clone(), CaseStatus::Inapplicable);
    }
    Case::for_element(table.clone(), CaseStatus::CantTell)
        .with_message("table may hold data but declares no headers")
}

/// True when the table declares data-table intent without header cells.
fn declares_data(query: &dyn DocumentQuery, table: &NodeRef) -> bool {
    if query.attribute(table, "summary").is_some() {
        return true;
    }
    query
        .scry("caption", table)
        .iter()
        .any(|caption| !query.text(caption).trim().is_empty())
}
