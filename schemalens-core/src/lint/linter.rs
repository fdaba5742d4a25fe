//! The table linter capability.

use crate::models::Table;

use super::models::{Lint, LintSeverity, LintValue};

/// A stateless check that inspects one table and reports findings.
///
/// Implementations must be total: a table missing the metadata a rule
/// looks at simply yields no finding. Rules never see each other's output,
/// so any registration order gives the same sorted result.
pub trait Linter: std::fmt::Debug + Send + Sync {
    /// Stable rule identifier, used in findings and configuration.
    fn id(&self) -> &'static str;

    /// One-line description of what the rule detects.
    fn description(&self) -> &'static str;

    /// Default severity of this rule's findings.
    fn severity(&self) -> LintSeverity;

    /// Inspects `table`, appending any findings to `lints`.
    fn lint(&self, table: &Table, lints: &mut Vec<Lint>);

    /// Builds a finding stamped with this rule's id and severity.
    fn finding(&self, message: &str, value: Option<LintValue>) -> Lint {
        Lint::new(self.id(), message, self.severity(), value)
    }
}
