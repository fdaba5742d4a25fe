//! Detects columns whose name promises a relationship the schema never
//! declares.

use crate::models::Table;
use crate::naming::{reference_stem, stem_names_table};

use super::linter::Linter;
use super::models::{Lint, LintSeverity, LintValue};

const UNDECLARED: &str = "column named like a foreign key has no foreign key constraint";
const UNRESOLVED: &str = "foreign key on column does not name a referenced column";

/// Flags `<stem>_id` columns that are not backed by a usable foreign key.
///
/// Columns whose stem names their own table (`orders.order_id`) are the
/// table's own identifier and are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullIntendedColumns;

impl Linter for NullIntendedColumns {
    fn id(&self) -> &'static str {
        "null-intended-columns"
    }

    fn description(&self) -> &'static str {
        "column implies a relationship that does not resolve"
    }

    fn severity(&self) -> LintSeverity {
        LintSeverity::Medium
    }

    fn lint(&self, table: &Table, lints: &mut Vec<Lint>) {
        for column in &table.columns {
            let Some(stem) = reference_stem(&column.name) else {
                continue;
            };
            if stem_names_table(&stem, &table.name) {
                continue;
            }

            let message = match table.foreign_key_for_column(&column.name) {
                None => UNDECLARED,
                Some(fk) if fk.referenced_table.is_empty() || fk.referenced_columns.is_empty() => {
                    UNRESOLVED
                }
                Some(_) => continue,
            };
            lints.push(self.finding(message, Some(LintValue::Column(column.name.clone()))));
        }
    }
}
