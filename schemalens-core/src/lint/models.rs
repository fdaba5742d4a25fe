//! Lint finding models.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    /// Worth a look, rarely harmful
    Low,
    /// Likely design problem
    Medium,
    /// Likely integrity or performance problem
    High,
    /// Almost certainly a defect
    Critical,
}

impl std::fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Schema object a finding points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LintValue {
    /// A single offending column
    Column(String),
    /// A group of related columns
    Columns(Vec<String>),
    /// An offending index
    Index(String),
}

impl std::fmt::Display for LintValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Column(name) | Self::Index(name) => write!(f, "{}", name),
            Self::Columns(names) => write!(f, "{}", names.join(", ")),
        }
    }
}

/// A lint finding on one table.
///
/// Findings order by rule id, then message, then severity and value, so a
/// sorted list is identical across runs regardless of rule order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lint {
    /// Identifier of the rule that produced the finding
    pub id: String,
    /// Human-readable description
    pub message: String,
    /// Severity of the finding
    pub severity: LintSeverity,
    /// Offending object, when the rule names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<LintValue>,
}

impl Lint {
    /// Creates a new finding.
    pub fn new(
        id: impl Into<String>,
        message: impl Into<String>,
        severity: LintSeverity,
        value: Option<LintValue>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            severity,
            value,
        }
    }
}

impl Ord for Lint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id
            .cmp(&other.id)
            .then_with(|| self.message.cmp(&other.message))
            .then_with(|| self.severity.cmp(&other.severity))
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for Lint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Lint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.id, self.message)?;
        if let Some(value) = &self.value {
            write!(f, " ({})", value)?;
        }
        Ok(())
    }
}
