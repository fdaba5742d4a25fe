//! Property tests over randomly generated schema graphs.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use schemalens_core::models::{
    Column, Database, Index, PrimaryKey, Schema, Table, UnifiedDataType,
};
use schemalens_core::{AnalyzedDatabase, InfoLevel, SchemaGraph};

const TABLE_NAMES: &[&str] = &["customers", "orders", "items", "category", "widget", "log"];
const COLUMN_NAMES: &[&str] = &[
    "id",
    "customer_id",
    "order_id",
    "item_id",
    "category_id",
    "phone1",
    "phone2",
    "name",
    "total",
];

fn data_type() -> impl Strategy<Value = UnifiedDataType> {
    prop_oneof![
        Just(UnifiedDataType::Integer { bits: 32, signed: true }),
        Just(UnifiedDataType::Integer { bits: 64, signed: true }),
        Just(UnifiedDataType::String { max_length: None }),
        Just(UnifiedDataType::Uuid),
    ]
}

/// A table with distinct column names, an optional primary key on its first
/// column and an optional index on its last column.
fn table(name: &'static str) -> impl Strategy<Value = Table> {
    (
        proptest::sample::subsequence(COLUMN_NAMES, 0..=5),
        proptest::collection::vec((data_type(), any::<bool>()), 5),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(move |(columns, types, with_key, with_index)| {
            let mut table = Table::new(name);
            for (column, (data_type, nullable)) in columns.iter().zip(types) {
                table = table.with_column(Column::new(*column, data_type).with_nullable(nullable));
            }
            if with_key {
                if let Some(first) = columns.first() {
                    table = table.with_primary_key(PrimaryKey::new(None, [*first]));
                }
            }
            if with_index {
                if let Some(last) = columns.last() {
                    table = table.with_index(Index::new(format!("{}_idx", name), [*last]));
                }
            }
            table
        })
}

fn database() -> impl Strategy<Value = Database> {
    proptest::sample::subsequence(TABLE_NAMES, 0..=TABLE_NAMES.len())
        .prop_flat_map(|names| names.into_iter().map(table).collect::<Vec<_>>())
        .prop_map(|tables| {
            let schema = tables
                .into_iter()
                .fold(Schema::new("public"), Schema::with_table);
            Database::new("generated").with_schema(schema)
        })
}

proptest! {
    #[test]
    fn test_determinism_of_repeated_analysis(db in database()) {
        let first = AnalyzedDatabase::new(&db, InfoLevel::Maximum);
        let second = AnalyzedDatabase::new(&db, InfoLevel::Maximum);

        for table in db.tables() {
            prop_assert_eq!(first.lints(table), second.lints(table));
            prop_assert_eq!(first.weak_associations(table), second.weak_associations(table));
        }
    }

    #[test]
    fn test_lints_are_always_sorted(db in database()) {
        let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Lint);
        for table in db.tables() {
            let lints = analyzed.lints(table);
            prop_assert!(lints.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[test]
    fn test_weak_associations_never_self_reference(db in database()) {
        let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Maximum);
        for table in analyzed.tables() {
            for map in analyzed.weak_associations(table) {
                prop_assert_eq!(map.source.table_ref(), table.table_ref());
                prop_assert_ne!(map.source.table_ref(), map.target.table_ref());

                let target = SchemaGraph::table(&analyzed, &map.target.table_ref())
                    .expect("target table exists");
                prop_assert!(target.is_key_column(&map.target.column));
            }
        }
    }

    #[test]
    fn test_lint_results_do_not_depend_on_deeper_passes(db in database()) {
        let lint_only = AnalyzedDatabase::new(&db, InfoLevel::Lint);
        let maximum = AnalyzedDatabase::new(&db, InfoLevel::Maximum);
        for table in db.tables() {
            prop_assert_eq!(lint_only.lints(table), maximum.lints(table));
            prop_assert!(lint_only.weak_associations(table).is_empty());
        }
    }

    #[test]
    fn test_shallow_levels_report_nothing(db in database()) {
        for level in [InfoLevel::None, InfoLevel::Basic] {
            let analyzed = AnalyzedDatabase::new(&db, level);
            prop_assert_eq!(analyzed.lint_count(), 0);
            prop_assert_eq!(analyzed.summary().weak_associations, 0);
        }
    }
}
