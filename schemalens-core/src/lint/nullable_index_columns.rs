//! Detects nullable columns inside secondary indexes.

use crate::models::Table;

use super::linter::Linter;
use super::models::{Lint, LintSeverity, LintValue};

/// Flags every index, other than the one backing the primary key, that
/// contains at least one nullable column. One finding per index.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullableColumnsInIndex;

impl Linter for NullableColumnsInIndex {
    fn id(&self) -> &'static str {
        "nullable-columns-in-index"
    }

    fn description(&self) -> &'static str {
        "index contains nullable columns"
    }

    fn severity(&self) -> LintSeverity {
        LintSeverity::High
    }

    fn lint(&self, table: &Table, lints: &mut Vec<Lint>) {
        for index in &table.indexes {
            if table.is_primary_key_index(index) {
                continue;
            }
            // Columns the crawler did not describe are not assumed nullable
            let has_nullable = index
                .column_names()
                .filter_map(|name| table.column(name))
                .any(|column| column.is_nullable);
            if has_nullable {
                lints.push(self.finding(
                    self.description(),
                    Some(LintValue::Index(index.name.clone())),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, Index, PrimaryKey, UnifiedDataType};

    fn int(name: &str) -> Column {
        Column::new(name, UnifiedDataType::Integer { bits: 32, signed: true })
    }

    fn run(table: &Table) -> Vec<Lint> {
        let mut lints = Vec::new();
        NullableColumnsInIndex.lint(table, &mut lints);
        lints
    }

    #[test]
    fn test_nullable_indexed_column_fires_per_index() {
        let table = Table::new("orders")
            .with_column(int("id"))
            .with_column(int("customer_id").with_nullable(true))
            .with_column(int("region_id").with_nullable(true))
            .with_index(Index::new("orders_customer_idx", ["customer_id", "region_id"]))
            .with_index(Index::new("orders_region_idx", ["region_id"]));

        let lints = run(&table);
        assert_eq!(lints.len(), 2);
        assert_eq!(lints[0].value, Some(LintValue::Index("orders_customer_idx".into())));
        assert_eq!(lints[1].value, Some(LintValue::Index("orders_region_idx".into())));
    }

    #[test]
    fn test_primary_key_index_is_ignored() {
        let table = Table::new("t")
            .with_column(int("id").with_nullable(true))
            .with_primary_key(PrimaryKey::new(Some("t_pkey".into()), ["id"]))
            .with_index(Index::new("t_pkey", ["id"]).unique());
        assert!(run(&table).is_empty());
    }

    #[test]
    fn test_not_null_index_is_fine() {
        let table = Table::new("t")
            .with_column(int("code"))
            .with_index(Index::new("t_code_key", ["code"]).unique());
        assert!(run(&table).is_empty());
    }

    #[test]
    fn test_unknown_index_column_is_ignored() {
        let table = Table::new("t")
            .with_column(int("code"))
            .with_index(Index::new("t_expr_idx", ["lower(name)"]));
        assert!(run(&table).is_empty());
    }
}
