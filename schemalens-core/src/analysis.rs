//! Analyzed-database facade.
//!
//! [`AnalyzedDatabase`] wraps a crawled [`Database`], runs the analysis
//! passes once during construction, and then answers the same read queries
//! as the wrapped graph plus per-table lint and weak-association lookups.
//! The wrapped graph is never modified; [`AnalyzedDatabase::to_annotated_database`]
//! produces a copy with the results exported into attribute bags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::associations::WeakAssociationsAnalyzer;
use crate::attributes::{AttributeStore, Attributes, INFO_LEVEL_KEY};
use crate::config::{AnalysisConfig, InfoLevel};
use crate::error::{Result, SchemaLensError};
use crate::graph::SchemaGraph;
use crate::lint::{Lint, LintEngine, LintSeverity};
use crate::models::{ColumnMap, Database, DatabaseInfo, DriverInfo, Schema, Table};

/// Totals over one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Info level the passes ran at
    pub info_level: InfoLevel,
    /// Number of tables in the wrapped graph
    pub tables_analyzed: usize,
    /// Total lint findings
    pub total_lints: usize,
    /// Lint findings per severity; severities without findings are omitted
    pub lints_by_severity: BTreeMap<LintSeverity, usize>,
    /// Total weak associations
    pub weak_associations: usize,
}

/// A database graph together with its analysis results.
///
/// # Example
///
/// ```rust
/// use schemalens_core::analysis::AnalyzedDatabase;
/// use schemalens_core::config::InfoLevel;
/// use schemalens_core::models::{Column, Database, Schema, Table, UnifiedDataType};
///
/// let db = Database::new("shop").with_schema(
///     Schema::new("public")
///         .with_table(Table::new("audit").with_column(Column::new("at", UnifiedDataType::Date))),
/// );
/// let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Lint);
/// let table = &db.schemas[0].tables[0];
/// assert_eq!(analyzed.lints(table).len(), 2);
/// assert!(analyzed.weak_associations(table).is_empty());
/// ```
#[derive(Debug)]
pub struct AnalyzedDatabase<'a> {
    database: &'a Database,
    info_level: InfoLevel,
    store: AttributeStore,
}

impl<'a> AnalyzedDatabase<'a> {
    /// Analyzes `database` with the built-in rules.
    pub fn new(database: &'a Database, info_level: InfoLevel) -> Self {
        Self::with_engine(database, info_level, &LintEngine::with_default_rules())
    }

    /// Analyzes an optional database.
    ///
    /// # Errors
    /// Returns `MissingDatabase` when no database is given.
    pub fn try_new(database: Option<&'a Database>, info_level: InfoLevel) -> Result<Self> {
        database
            .map(|db| Self::new(db, info_level))
            .ok_or(SchemaLensError::MissingDatabase)
    }

    /// Analyzes `database` with rules and level taken from `config`.
    ///
    /// # Errors
    /// Returns an error if the lint configuration names an unknown rule.
    pub fn with_config(database: &'a Database, config: &AnalysisConfig) -> Result<Self> {
        let engine = LintEngine::from_config(&config.lint)?;
        Ok(Self::with_engine(database, config.info_level, &engine))
    }

    /// Analyzes `database` with an explicit lint engine.
    pub fn with_engine(database: &'a Database, info_level: InfoLevel, engine: &LintEngine) -> Self {
        let mut store = AttributeStore::new();
        let tables: Vec<&Table> = database.tables().collect();
        tracing::info!(
            "Analyzing database '{}' at info level '{}' ({} tables)",
            database.name,
            info_level,
            tables.len()
        );

        if info_level.runs_lints() {
            engine.run_all(tables.iter().copied(), &mut store);
        } else {
            tracing::debug!("Skipping lint pass at info level '{}'", info_level);
        }

        if info_level.runs_weak_associations() {
            WeakAssociationsAnalyzer::new(tables).analyze_into(&mut store);
        } else {
            tracing::debug!("Skipping weak-association pass at info level '{}'", info_level);
        }

        Self {
            database,
            info_level,
            store,
        }
    }

    /// The wrapped graph.
    pub fn database(&self) -> &'a Database {
        self.database
    }

    /// Info level the passes ran at.
    pub fn info_level(&self) -> InfoLevel {
        self.info_level
    }

    /// Raw per-table results.
    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    /// Lint findings for `table`, sorted. Empty for tables this facade does
    /// not know and for tables without findings.
    pub fn lints(&self, table: &Table) -> Vec<Lint> {
        self.store
            .get(&table.table_ref())
            .map(|attrs| attrs.sorted_lints())
            .unwrap_or_default()
    }

    /// Weak associations held by `table`. Empty for tables this facade does
    /// not know and for tables without associations.
    pub fn weak_associations(&self, table: &Table) -> Vec<ColumnMap> {
        self.store.weak_associations(&table.table_ref()).to_vec()
    }

    /// Total lint findings across all tables.
    pub fn lint_count(&self) -> usize {
        self.store.iter().map(|(_, attrs)| attrs.lints.len()).sum()
    }

    /// Totals over the run.
    pub fn summary(&self) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            info_level: self.info_level,
            tables_analyzed: self.database.table_count(),
            ..AnalysisSummary::default()
        };
        for (_, attrs) in self.store.iter() {
            summary.total_lints = summary.total_lints.saturating_add(attrs.lints.len());
            summary.weak_associations = summary
                .weak_associations
                .saturating_add(attrs.weak_associations.len());
            for lint in &attrs.lints {
                let count = summary.lints_by_severity.entry(lint.severity).or_default();
                *count = count.saturating_add(1);
            }
        }
        summary
    }

    /// Copies the wrapped graph with each analyzed table's results exported
    /// into its attribute bag.
    ///
    /// # Errors
    /// Returns an error if the results cannot be encoded.
    pub fn to_annotated_database(&self) -> Result<Database> {
        let mut annotated = self.database.clone();
        annotated
            .attributes
            .set(INFO_LEVEL_KEY, self.info_level.as_str());

        for table in annotated.schemas.iter_mut().flat_map(|s| s.tables.iter_mut()) {
            if let Some(results) = self.store.get(&table.table_ref()) {
                results.export_into(&mut table.attributes)?;
            }
        }
        Ok(annotated)
    }
}

impl SchemaGraph for AnalyzedDatabase<'_> {
    fn name(&self) -> &str {
        self.database.name()
    }

    fn database_info(&self) -> &DatabaseInfo {
        self.database.database_info()
    }

    fn driver_info(&self) -> &DriverInfo {
        self.database.driver_info()
    }

    fn schemas(&self) -> &[Schema] {
        self.database.schemas()
    }

    fn attributes(&self) -> &Attributes {
        SchemaGraph::attributes(self.database)
    }
}

/// Lint findings for `table` from an analyzed database.
pub fn get_lint(analyzed: &AnalyzedDatabase<'_>, table: &Table) -> Vec<Lint> {
    analyzed.lints(table)
}

/// Weak associations held by `table` in an analyzed database.
pub fn get_weak_associations(analyzed: &AnalyzedDatabase<'_>, table: &Table) -> Vec<ColumnMap> {
    analyzed.weak_associations(table)
}
