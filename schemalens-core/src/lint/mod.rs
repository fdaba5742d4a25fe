//! Table lint rules and the engine that runs them.
//!
//! Built-in rules:
//! - **incrementing-columns**: `phone1`, `phone2`, ... repeating groups
//! - **no-indices**: base tables without any index or primary key
//! - **nullable-columns-in-index**: secondary indexes over nullable columns
//! - **null-intended-columns**: `<table>_id` columns with no usable foreign key
//! - **single-column-table**: tables with exactly one column
//!
//! # Example
//! ```rust
//! use schemalens_core::attributes::AttributeStore;
//! use schemalens_core::lint::LintEngine;
//! use schemalens_core::models::{Column, Table, UnifiedDataType};
//!
//! let tables = vec![Table::new("audit").with_column(Column::new("at", UnifiedDataType::Date))];
//! let mut store = AttributeStore::new();
//! let total = LintEngine::with_default_rules().run_all(&tables, &mut store);
//! assert_eq!(total, 2);
//! ```

mod config;
mod engine;
mod incrementing_columns;
mod linter;
mod models;
mod no_indices;
mod null_intended_columns;
mod nullable_index_columns;
mod single_column;

// Re-export public API
pub use config::LintConfig;
pub use engine::{LintEngine, default_rules};
pub use incrementing_columns::IncrementingColumns;
pub use linter::Linter;
pub use models::{Lint, LintSeverity, LintValue};
pub use no_indices::NoIndices;
pub use null_intended_columns::NullIntendedColumns;
pub use nullable_index_columns::NullableColumnsInIndex;
pub use single_column::SingleColumnTable;
