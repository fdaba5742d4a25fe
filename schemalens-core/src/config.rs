//! Analysis configuration.
//!
//! The info level decides which passes run; the lint section adjusts the
//! lint pass itself.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaLensError};
use crate::lint::{LintConfig, default_rules};

/// How much analysis to perform, ordered from least to most.
///
/// Lints are computed at `Lint` and above; weak associations only at
/// `Maximum`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InfoLevel {
    /// No analysis
    None,
    /// Metadata only, no derived information
    Basic,
    /// Lint pass
    Lint,
    /// Lint pass and weak-association inference
    #[default]
    Maximum,
}

impl InfoLevel {
    /// All levels from least to most.
    pub const ALL: [Self; 4] = [Self::None, Self::Basic, Self::Lint, Self::Maximum];

    /// Checks whether the lint pass runs at this level.
    pub fn runs_lints(self) -> bool {
        self >= Self::Lint
    }

    /// Checks whether weak-association inference runs at this level.
    pub fn runs_weak_associations(self) -> bool {
        self >= Self::Maximum
    }

    /// Lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Lint => "lint",
            Self::Maximum => "maximum",
        }
    }
}

impl fmt::Display for InfoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoLevel {
    type Err = SchemaLensError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SchemaLensError::invalid_info_level(s))
    }
}

/// Configuration for one analysis run.
///
/// # Example
///
/// ```rust
/// use schemalens_core::config::{AnalysisConfig, InfoLevel};
///
/// let config = AnalysisConfig::from_json_str(
///     r#"{"info_level": "lint", "lint": {"disabled_rules": ["single-column-table"]}}"#,
/// )
/// .expect("valid config");
/// assert_eq!(config.info_level, InfoLevel::Lint);
/// assert!(!config.lint.is_enabled("single-column-table"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Which passes run
    pub info_level: InfoLevel,
    /// Lint rule adjustments
    pub lint: LintConfig,
}

impl AnalysisConfig {
    /// Creates a config running every pass with default rule settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the info level.
    pub fn with_info_level(mut self, info_level: InfoLevel) -> Self {
        self.info_level = info_level;
        self
    }

    /// Builder method to set the lint configuration.
    pub fn with_lint_config(mut self, lint: LintConfig) -> Self {
        self.lint = lint;
        self
    }

    /// Validates rule ids against the built-in rules.
    ///
    /// # Errors
    /// Returns `UnknownRule` if the lint section names a rule that does
    /// not exist.
    pub fn validate(&self) -> Result<()> {
        let rules = default_rules();
        let known: Vec<&str> = rules.iter().map(|rule| rule.id()).collect();
        self.lint.validate(&known)
    }

    /// Parses and validates a JSON config document.
    ///
    /// # Errors
    /// Returns an error if the document is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SchemaLensError::serialization("Failed to parse analysis config", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, otherwise as
    /// [`AnalysisConfig::from_json_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            SchemaLensError::io(format!("Failed to read config {}", path.display()), e)
        })?;
        Self::from_json_str(&data)
    }
}
