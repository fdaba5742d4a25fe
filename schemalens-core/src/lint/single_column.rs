//! Detects tables with exactly one column.

use crate::models::Table;

use super::linter::Linter;
use super::models::{Lint, LintSeverity};

/// Flags a table with exactly one column.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleColumnTable;

impl Linter for SingleColumnTable {
    fn id(&self) -> &'static str {
        "single-column-table"
    }

    fn description(&self) -> &'static str {
        "table has a single column"
    }

    fn severity(&self) -> LintSeverity {
        LintSeverity::Low
    }

    fn lint(&self, table: &Table, lints: &mut Vec<Lint>) {
        if table.columns.len() == 1 {
            lints.push(self.finding(self.description(), None));
        }
    }
}
