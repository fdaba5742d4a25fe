//! Core analysis library for SchemaLens.
//!
//! SchemaLens derives design findings from an already-crawled database
//! schema graph. It never talks to a database: the crawler produces a
//! [`Database`] snapshot and this crate analyzes it in memory.
//!
//! # Passes
//! - **Lint**: per-table rules reporting design smells
//!   (see [`lint`] for the built-in rule list)
//! - **Weak associations**: undeclared relationships inferred from column
//!   naming conventions across the whole graph
//!
//! Which passes run is controlled by the [`InfoLevel`]. Results live in a
//! side-table owned by the [`AnalyzedDatabase`] facade; the crawled graph is
//! never modified.
//!
//! # Example
//! ```rust
//! use schemalens_core::{AnalyzedDatabase, InfoLevel};
//! use schemalens_core::models::{Column, Database, PrimaryKey, Schema, Table, UnifiedDataType};
//!
//! let db = Database::new("inventory").with_schema(
//!     Schema::new("public").with_table(
//!         Table::new("singleton")
//!             .with_column(Column::new("id", UnifiedDataType::Uuid))
//!             .with_primary_key(PrimaryKey::new(None, ["id"])),
//!     ),
//! );
//! let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Maximum);
//! let lints = analyzed.lints(&db.schemas[0].tables[0]);
//! assert_eq!(lints.len(), 1);
//! assert_eq!(lints[0].id, "single-column-table");
//! ```

pub mod analysis;
pub mod associations;
pub mod attributes;
pub mod config;
pub mod error;
pub mod graph;
pub mod lint;
pub mod logging;
pub mod models;
pub mod naming;

// Re-export commonly used types
pub use analysis::{AnalysisSummary, AnalyzedDatabase, get_lint, get_weak_associations};
pub use associations::WeakAssociationsAnalyzer;
pub use attributes::{AttributeStore, Attributes, LINT_KEY, WEAK_ASSOCIATIONS_KEY};
pub use config::{AnalysisConfig, InfoLevel};
pub use error::{Result, SchemaLensError};
pub use graph::SchemaGraph;
pub use lint::{Lint, LintConfig, LintEngine, LintSeverity, LintValue, Linter};
pub use models::{
    Column, ColumnMap, ColumnRef, Database, DatabaseInfo, DriverInfo, ForeignKey, Index,
    PrimaryKey, Schema, Table, TableRef, UnifiedDataType,
};
