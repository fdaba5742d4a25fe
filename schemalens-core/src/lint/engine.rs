//! Lint engine: runs an ordered list of rules over every table.

use crate::attributes::AttributeStore;
use crate::error::Result;
use crate::models::Table;

use super::config::LintConfig;
use super::incrementing_columns::IncrementingColumns;
use super::linter::Linter;
use super::models::Lint;
use super::no_indices::NoIndices;
use super::null_intended_columns::NullIntendedColumns;
use super::nullable_index_columns::NullableColumnsInIndex;
use super::single_column::SingleColumnTable;

/// Returns the built-in rules in their registration order.
pub fn default_rules() -> Vec<Box<dyn Linter>> {
    vec![
        Box::new(IncrementingColumns),
        Box::new(NoIndices),
        Box::new(NullableColumnsInIndex),
        Box::new(NullIntendedColumns),
        Box::new(SingleColumnTable),
    ]
}

/// Runs registered lint rules against tables.
///
/// # Example
///
/// ```rust
/// use schemalens_core::lint::LintEngine;
/// use schemalens_core::models::{Column, Table, UnifiedDataType};
///
/// let table = Table::new("singleton").with_column(Column::new("id", UnifiedDataType::Uuid));
/// let lints = LintEngine::with_default_rules().lint_table(&table);
/// assert!(lints.iter().any(|l| l.id == "single-column-table"));
/// ```
#[derive(Debug, Default)]
pub struct LintEngine {
    rules: Vec<Box<dyn Linter>>,
    config: LintConfig,
}

impl LintEngine {
    /// Creates an engine with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with every built-in rule.
    pub fn with_default_rules() -> Self {
        Self {
            rules: default_rules(),
            config: LintConfig::default(),
        }
    }

    /// Creates an engine with the built-in rules filtered and adjusted by
    /// `config`.
    ///
    /// # Errors
    /// Returns an error if the config names a rule that is not built in.
    pub fn from_config(config: &LintConfig) -> Result<Self> {
        let rules = default_rules();
        let known: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        config.validate(&known)?;

        let rules: Vec<Box<dyn Linter>> = rules
            .into_iter()
            .filter(|rule| {
                let enabled = config.is_enabled(rule.id());
                if !enabled {
                    tracing::debug!("Lint rule '{}' disabled by configuration", rule.id());
                }
                enabled
            })
            .collect();

        Ok(Self {
            rules,
            config: config.clone(),
        })
    }

    /// Registers a rule after the existing ones.
    pub fn register(&mut self, rule: Box<dyn Linter>) {
        self.rules.push(rule);
    }

    /// Builder method to register a rule.
    pub fn with_rule(mut self, rule: impl Linter + 'static) -> Self {
        self.register(Box::new(rule));
        self
    }

    /// Registered rules in execution order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Linter> {
        self.rules.iter().map(|rule| &**rule)
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs every rule once against `table` and returns the findings in
    /// the order the rules produced them.
    pub fn lint_table(&self, table: &Table) -> Vec<Lint> {
        let mut lints = Vec::new();
        for rule in &self.rules {
            let before = lints.len();
            rule.lint(table, &mut lints);
            if let Some(severity) = self.config.severity_for(rule.id()) {
                for lint in &mut lints[before..] {
                    lint.severity = severity;
                }
            }
            tracing::trace!(
                "Rule '{}' reported {} finding(s) on '{}'",
                rule.id(),
                lints.len().saturating_sub(before),
                table.full_name()
            );
        }
        lints
    }

    /// Lints every table exactly once, appending findings to each table's
    /// entry in `store`. Returns the total number of findings.
    pub fn run_all<'a, I>(&self, tables: I, store: &mut AttributeStore) -> usize
    where
        I: IntoIterator<Item = &'a Table>,
    {
        let mut total: usize = 0;
        let mut table_count: usize = 0;
        for table in tables {
            let lints = self.lint_table(table);
            if !lints.is_empty() {
                tracing::debug!("Table '{}': {} lint finding(s)", table.full_name(), lints.len());
            }
            total = total.saturating_add(lints.len());
            table_count = table_count.saturating_add(1);
            store.append_lints(table.table_ref(), lints);
        }
        tracing::info!(
            "Lint pass complete: {} finding(s) across {} table(s) using {} rule(s)",
            total,
            table_count,
            self.rules.len()
        );
        total
    }
}
