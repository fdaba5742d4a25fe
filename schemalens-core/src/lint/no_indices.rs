//! Detects base tables with no index at all.

use crate::models::Table;

use super::linter::Linter;
use super::models::{Lint, LintSeverity};

/// Flags a base table that has columns but neither a primary key nor any
/// index. Views are never flagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndices;

impl Linter for NoIndices {
    fn id(&self) -> &'static str {
        "no-indices"
    }

    fn description(&self) -> &'static str {
        "table has no indices"
    }

    fn severity(&self) -> LintSeverity {
        LintSeverity::High
    }

    fn lint(&self, table: &Table, lints: &mut Vec<Lint>) {
        if table.is_view() || table.columns.is_empty() || table.has_indexes() {
            return;
        }
        lints.push(self.finding(self.description(), None));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, Index, PrimaryKey, UnifiedDataType};

    fn id_column() -> Column {
        Column::new("id", UnifiedDataType::Integer { bits: 64, signed: true })
    }

    fn run(table: &Table) -> Vec<Lint> {
        let mut lints = Vec::new();
        NoIndices.lint(table, &mut lints);
        lints
    }

    #[test]
    fn test_unindexed_table_fires() {
        let table = Table::new("audit_log").with_column(id_column());
        let lints = run(&table);
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].id, "no-indices");
        assert_eq!(lints[0].severity, LintSeverity::High);
    }

    #[test]
    fn test_primary_key_counts_as_index() {
        let table = Table::new("t")
            .with_column(id_column())
            .with_primary_key(PrimaryKey::new(None, ["id"]));
        assert!(run(&table).is_empty());
    }

    #[test]
    fn test_secondary_index_counts() {
        let table = Table::new("t")
            .with_column(id_column())
            .with_index(Index::new("t_id_idx", ["id"]));
        assert!(run(&table).is_empty());
    }

    #[test]
    fn test_views_and_empty_tables_are_skipped() {
        assert!(run(&Table::new("v").with_column(id_column()).as_view()).is_empty());
        assert!(run(&Table::new("empty")).is_empty());
    }
}
