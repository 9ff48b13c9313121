// crates/guideline-audit-config/src/registry_file.rs
// ============================================================================
// Module: Guideline Registry Document
// Description: Registry loading and validation for guideline audits.
// Purpose: Provide strict, fail-closed registry parsing from TOML documents.
// Dependencies: guideline-audit-core, serde, toml
// ============================================================================

//! ## Overview
//! A registry document is loaded from a TOML file with strict size and path
//! limits. Family names, criterion ids, and technique lists are validated
//! before the document is converted into the engine's read-only
//! [`GuidelineRegistry`]; invalid documents fail closed and no run starts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use guideline_audit_core::CriterionId;
use guideline_audit_core::CriterionMembership;
use guideline_audit_core::GuidelineFamily;
use guideline_audit_core::GuidelineRegistry;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default registry filename when no path is specified.
const DEFAULT_REGISTRY_NAME: &str = "guideline-audit.toml";
/// Environment variable used to override the registry path.
pub(crate) const REGISTRY_ENV_VAR: &str = "GUIDELINE_AUDIT_REGISTRY";
/// Maximum registry file size in bytes.
pub(crate) const MAX_REGISTRY_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of technique identifiers on one criterion.
pub(crate) const MAX_TECHNIQUES_PER_CRITERION: usize = 128;

// ============================================================================
// SECTION: Document Types
// ============================================================================

/// On-disk guideline registry document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistryDocument {
    /// Guideline families keyed by name.
    #[serde(default)]
    pub families: BTreeMap<String, FamilyEntry>,
}

/// One guideline family in a registry document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FamilyEntry {
    /// Optional human-readable family title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Success criteria keyed by criterion id.
    #[serde(default)]
    pub criteria: BTreeMap<String, CriterionEntry>,
}

/// One success criterion in a registry document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CriterionEntry {
    /// Technique identifiers linked to the criterion.
    #[serde(default)]
    pub techniques: Vec<String>,
    /// Optional per-guideline assessment configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_json::Value>,
}

impl RegistryDocument {
    /// Loads a registry document from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_REGISTRY_FILE_SIZE {
            return Err(ConfigError::Invalid("registry file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("registry file must be utf-8".to_string()))?;
        Self::load_str(content)
    }

    /// Parses and validates a registry document from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let document: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        document.validate()?;
        Ok(document)
    }

    /// Validates the document for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (family, entry) in &self.families {
            if family.trim().is_empty() {
                return Err(ConfigError::Invalid("blank family name".to_string()));
            }
            if entry.criteria.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "family '{family}' has no criteria"
                )));
            }
            for (criterion, criterion_entry) in &entry.criteria {
                criterion_entry.validate(family, criterion)?;
            }
        }
        Ok(())
    }

    /// Converts a validated document into the engine registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when an entry is rejected by the
    /// engine's own insertion checks.
    pub fn into_registry(self) -> Result<GuidelineRegistry, ConfigError> {
        let mut registry = GuidelineRegistry::new();
        for (family, entry) in self.families {
            for (criterion, criterion_entry) in entry.criteria {
                let mut membership =
                    CriterionMembership::from_techniques(criterion_entry.techniques);
                membership.configuration = criterion_entry.configuration;
                registry
                    .insert(
                        GuidelineFamily::new(family.clone()),
                        CriterionId::new(criterion),
                        membership,
                    )
                    .map_err(|err| ConfigError::Invalid(err.to_string()))?;
            }
        }
        Ok(registry)
    }
}

impl CriterionEntry {
    /// Validates one criterion entry.
    fn validate(&self, family: &str, criterion: &str) -> Result<(), ConfigError> {
        if criterion.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "family '{family}' has a blank criterion id"
            )));
        }
        if self.techniques.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "criterion '{family}:{criterion}' has an empty technique list"
            )));
        }
        if self.techniques.len() > MAX_TECHNIQUES_PER_CRITERION {
            return Err(ConfigError::Invalid(format!(
                "criterion '{family}:{criterion}' exceeds the technique limit"
            )));
        }
        for technique in &self.techniques {
            if technique.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "criterion '{family}:{criterion}' has a blank technique id"
                )));
            }
        }
        Ok(())
    }
}

/// Loads and converts a registry in one step.
///
/// # Errors
///
/// Returns [`ConfigError`] when loading, validation, or conversion fails.
pub fn load_registry(path: Option<&Path>) -> Result<GuidelineRegistry, ConfigError> {
    RegistryDocument::load(path)?.into_registry()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading the registry.
    #[error("registry io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("registry parse error: {0}")]
    Parse(String),
    /// Invalid registry data.
    #[error("invalid registry: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the registry path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(REGISTRY_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("registry path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_REGISTRY_NAME))
}

/// Validates path shape before any filesystem access.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("registry path exceeds max length".to_string()));
    }
    for component in path.components() {
        if let Component::Normal(part) = component
            && part.len() > MAX_PATH_COMPONENT_LENGTH
        {
            return Err(ConfigError::Invalid(
                "registry path component exceeds max length".to_string(),
            ));
        }
    }
    Ok(())
}
