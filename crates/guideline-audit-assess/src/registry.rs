// crates/guideline-audit-assess/src/registry.rs
// ============================================================================
// Module: Assessment Registry
// Description: Registry for built-in and caller-supplied assessments.
// Purpose: Resolve assessments by name for the run orchestrator.
// Dependencies: guideline-audit-core
// ============================================================================

//! ## Overview
//! The registry implements the core [`AssessmentCatalog`] interface over a
//! name-ordered map. It is caller-constructed and passed into the
//! orchestrator explicitly; there is no ambient global registry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use guideline_audit_core::Assessment;
use guideline_audit_core::AssessmentCatalog;

use crate::data_table::DATA_TABLE_HEADERS_NAME;
use crate::data_table::DataTableHeaders;
use crate::label::LABEL_PRESENT_NAME;
use crate::label::LabelPresent;
use crate::readable_text::READABLE_TEXT_NAME;
use crate::readable_text::ReadableText;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Name-keyed assessment registry.
///
/// # Invariants
/// - Names iterate in lexicographic order.
/// - Registering an existing name replaces the previous assessment.
#[derive(Default)]
pub struct AssessmentRegistry {
    /// Assessment implementations keyed by registry name.
    assessments: BTreeMap<String, Arc<dyn Assessment>>,
}

impl AssessmentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in assessments registered.
    #[must_use]
    pub fn with_builtin_assessments() -> Self {
        let mut registry = Self::new();
        registry.register(LABEL_PRESENT_NAME, LabelPresent::new());
        registry.register(DATA_TABLE_HEADERS_NAME, DataTableHeaders::new());
        registry.register(READABLE_TEXT_NAME, ReadableText::new());
        registry
    }

    /// Registers an assessment under the given name.
    pub fn register(&mut self, name: impl Into<String>, assessment: impl Assessment + 'static) {
        self.assessments.insert(name.into(), Arc::new(assessment));
    }

    /// Registers a shared assessment handle under the given name.
    pub fn register_shared(&mut self, name: impl Into<String>, assessment: Arc<dyn Assessment>) {
        self.assessments.insert(name.into(), assessment);
    }

    /// Returns the number of registered assessments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    /// Returns true when no assessment is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}

impl AssessmentCatalog for AssessmentRegistry {
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.assessments.keys().map(String::as_str))
    }

    fn get(&self, name: &str) -> Option<Arc<dyn Assessment>> {
        self.assessments.get(name).cloned()
    }
}
