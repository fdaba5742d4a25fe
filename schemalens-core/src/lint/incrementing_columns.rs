//! Detects repeated columns distinguished only by a numeric suffix.
//!
//! `phone1`, `phone2`, `phone3` usually means a repeating group that
//! belongs in its own table.

use std::collections::BTreeMap;

use crate::models::{Column, Table};
use crate::naming::numeric_suffix;

use super::linter::Linter;
use super::models::{Lint, LintSeverity, LintValue};

/// Flags groups of two or more columns sharing a prefix and differing only
/// in a trailing number. One finding per group.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementingColumns;

impl Linter for IncrementingColumns {
    fn id(&self) -> &'static str {
        "incrementing-columns"
    }

    fn description(&self) -> &'static str {
        "columns with incrementing numeric suffixes"
    }

    fn severity(&self) -> LintSeverity {
        LintSeverity::Medium
    }

    fn lint(&self, table: &Table, lints: &mut Vec<Lint>) {
        let mut groups: BTreeMap<String, Vec<&Column>> = BTreeMap::new();
        for column in &table.columns {
            if let Some((prefix, _)) = numeric_suffix(&column.name) {
                groups.entry(prefix).or_default().push(column);
            }
        }

        for (prefix, mut columns) in groups {
            if columns.len() < 2 {
                continue;
            }
            columns.sort_by_key(|c| c.ordinal_position);
            tracing::debug!(
                "Table '{}' has {} columns with prefix '{}'",
                table.full_name(),
                columns.len(),
                prefix
            );
            let names = columns.iter().map(|c| c.name.clone()).collect();
            lints.push(self.finding(self.description(), Some(LintValue::Columns(names))));
        }
    }
}
