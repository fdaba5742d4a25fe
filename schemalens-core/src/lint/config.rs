//! Lint rule configuration.
//!
//! Rules can be switched off and their severities overridden by rule id.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaLensError};

use super::models::LintSeverity;

/// Per-rule lint settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Rule ids that must not run
    pub disabled_rules: BTreeSet<String>,
    /// Severity to report instead of a rule's default
    pub severity_overrides: BTreeMap<String, LintSeverity>,
}

impl LintConfig {
    /// Creates a config with every rule enabled at its default severity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to disable a rule.
    pub fn with_disabled_rule(mut self, id: impl Into<String>) -> Self {
        self.disabled_rules.insert(id.into());
        self
    }

    /// Builder method to override a rule's severity.
    pub fn with_severity_override(mut self, id: impl Into<String>, severity: LintSeverity) -> Self {
        self.severity_overrides.insert(id.into(), severity);
        self
    }

    /// Checks whether a rule should run.
    pub fn is_enabled(&self, id: &str) -> bool {
        !self.disabled_rules.contains(id)
    }

    /// Returns the overridden severity for a rule, if any.
    pub fn severity_for(&self, id: &str) -> Option<LintSeverity> {
        self.severity_overrides.get(id).copied()
    }

    /// Validates that every referenced rule id is one of `known_ids`.
    ///
    /// # Errors
    /// Returns `UnknownRule` for the first id that is not registered.
    pub fn validate(&self, known_ids: &[&str]) -> Result<()> {
        self.disabled_rules
            .iter()
            .chain(self.severity_overrides.keys())
            .find(|id| !known_ids.contains(&id.as_str()))
            .map_or(Ok(()), |id| Err(SchemaLensError::unknown_rule(id.clone())))
    }
}
