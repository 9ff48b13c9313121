// crates/guideline-audit-core/src/core/guidelines.rs
// ============================================================================
// Module: Guideline Registry
// Description: Read-only guideline configuration and per-test membership maps.
// Purpose: Map guideline family -> criterion -> technique identifiers for
//          criteria resolution and test tagging.
// Dependencies: crate::core::{error, identifiers}, serde
// ============================================================================

//! ## Overview
//! The guideline registry is static configuration supplied before a run and
//! never mutated by the engine. Tests carry their own membership map of the
//! same shape; criteria resolution intersects the two technique sets.
//! Invariants:
//! - Family and criterion names are non-blank.
//! - Every criterion entry carries at least one technique.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::core::error::AuditError;
use crate::core::identifiers::CriterionId;
use crate::core::identifiers::GuidelineFamily;
use crate::core::identifiers::TechniqueId;

// ============================================================================
// SECTION: Criterion Membership
// ============================================================================

/// Technique set (and optional assessment configuration) attached to one
/// criterion, either in the registry or in a test's membership map.
///
/// # Invariants
/// - `techniques` is non-empty for registry entries; test membership may
///   carry any subset the test implements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionMembership {
    /// Technique identifiers linked to the criterion.
    pub techniques: BTreeSet<TechniqueId>,
    /// Optional per-guideline assessment configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_json::Value>,
}

impl CriterionMembership {
    /// Creates a membership entry from technique identifiers.
    #[must_use]
    pub fn from_techniques<I, T>(techniques: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            techniques: techniques
                .into_iter()
                .map(|technique| TechniqueId::new(technique))
                .collect(),
            configuration: None,
        }
    }

    /// Returns true when this entry shares at least one technique with `other`.
    #[must_use]
    pub fn intersects(&self, other: &BTreeSet<TechniqueId>) -> bool {
        self.techniques
            .iter()
            .any(|technique| other.contains(technique))
    }
}

/// Guideline membership map carried by a test: family -> criterion -> entry.
pub type GuidelineMembership = BTreeMap<GuidelineFamily, BTreeMap<CriterionId, CriterionMembership>>;

// ============================================================================
// SECTION: Guideline Registry
// ============================================================================

/// Read-only mapping of guideline families to criteria and techniques.
///
/// # Invariants
/// - Entries are validated at insertion and never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineRegistry {
    /// Families keyed by name, each mapping criterion id to its entry.
    families: BTreeMap<GuidelineFamily, BTreeMap<CriterionId, CriterionMembership>>,
}

impl GuidelineRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            families: BTreeMap::new(),
        }
    }

    /// Inserts one criterion entry under a family.
    ///
    /// # Errors
    /// Returns [`AuditError::MalformedGuideline`] when the family or criterion
    /// name is blank, or the technique list is empty.
    pub fn insert(
        &mut self,
        family: GuidelineFamily,
        criterion: CriterionId,
        entry: CriterionMembership,
    ) -> Result<(), AuditError> {
        let reject = |reason: &str| AuditError::MalformedGuideline {
            family: family.as_str().to_string(),
            criterion: criterion.as_str().to_string(),
            reason: reason.to_string(),
        };
        if family.as_str().trim().is_empty() {
            return Err(reject("blank family name"));
        }
        if criterion.as_str().trim().is_empty() {
            return Err(reject("blank criterion id"));
        }
        if entry.techniques.is_empty() {
            return Err(reject("empty technique list"));
        }
        self.families
            .entry(family)
            .or_default()
            .insert(criterion, entry);
        Ok(())
    }

    /// Returns the entry for a criterion, if registered.
    #[must_use]
    pub fn entry(
        &self,
        family: &GuidelineFamily,
        criterion: &CriterionId,
    ) -> Option<&CriterionMembership> {
        self.families.get(family)?.get(criterion)
    }

    /// Returns the technique set for a criterion, if registered.
    #[must_use]
    pub fn techniques(
        &self,
        family: &GuidelineFamily,
        criterion: &CriterionId,
    ) -> Option<&BTreeSet<TechniqueId>> {
        self.entry(family, criterion).map(|entry| &entry.techniques)
    }

    /// Iterates over registered families in name order.
    pub fn families(&self) -> impl Iterator<Item = &GuidelineFamily> {
        self.families.keys()
    }

    /// Iterates over the criteria of one family in id order.
    pub fn criteria(
        &self,
        family: &GuidelineFamily,
    ) -> impl Iterator<Item = (&CriterionId, &CriterionMembership)> {
        self.families.get(family).into_iter().flatten()
    }

    /// Returns the number of registered families.
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Returns true when no family is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
