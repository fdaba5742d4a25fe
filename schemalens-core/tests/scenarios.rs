//! End-to-end analysis scenarios over small schema graphs.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

mod common;

use common::{database, orders, shop, singleton, warehouse, widget};
use schemalens_core::models::{Database, Table, TableRef};
use schemalens_core::{
    AnalysisConfig, AnalyzedDatabase, InfoLevel, LINT_KEY, LintConfig, LintSeverity, LintValue,
    SchemaGraph, SchemaLensError, WEAK_ASSOCIATIONS_KEY, get_lint, get_weak_associations,
};

fn table<'a>(analyzed: &'a AnalyzedDatabase<'_>, name: &str) -> &'a Table {
    SchemaGraph::table(analyzed, &TableRef::new(Some("public".into()), name))
        .expect("fixture table")
}

#[test]
fn test_scenario_orders_reference_customers() {
    let db = shop();
    let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Maximum);

    let associations = get_weak_associations(&analyzed, table(&analyzed, "orders"));
    assert_eq!(associations.len(), 1);
    assert_eq!(associations[0].source.to_string(), "public.orders.customer_id");
    assert_eq!(associations[0].target.to_string(), "public.customers.customer_id");

    assert!(get_weak_associations(&analyzed, table(&analyzed, "customers")).is_empty());
}

#[test]
fn test_scenario_widget_incrementing_columns() {
    let db = database([widget()]);
    let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Lint);
    let lints = get_lint(&analyzed, table(&analyzed, "widget"));

    let incrementing: Vec<_> = lints
        .iter()
        .filter(|l| l.id == "incrementing-columns")
        .collect();
    assert_eq!(incrementing.len(), 1);
    assert_eq!(
        incrementing[0].value,
        Some(LintValue::Columns(vec!["phone1".into(), "phone2".into()]))
    );
}

#[test]
fn test_scenario_singleton_fires_only_single_column() {
    let db = database([singleton()]);
    let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Maximum);
    let lints = get_lint(&analyzed, table(&analyzed, "singleton"));

    let ids: Vec<&str> = lints.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["single-column-table"]);
}

#[test]
fn test_scenario_snapshot_same_table_in_two_schemas() {
    let json = r#"{
        "name": "crm",
        "schemas": [
            {
                "name": "sales",
                "tables": [{
                    "name": "contacts",
                    "columns": [
                        {"name": "phone1", "data_type": {"String": {"max_length": 20}}, "ordinal_position": 1},
                        {"name": "phone2", "data_type": {"String": {"max_length": 20}}, "ordinal_position": 2}
                    ]
                }]
            },
            {
                "name": "crm",
                "tables": [{
                    "name": "contacts",
                    "columns": [
                        {"name": "phone1", "data_type": {"String": {"max_length": 20}}, "ordinal_position": 1},
                        {"name": "phone2", "data_type": {"String": {"max_length": 20}}, "ordinal_position": 2}
                    ]
                }]
            }
        ]
    }"#;
    let db = Database::from_json_str(json).expect("snapshot");
    let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Lint);

    for schema in ["sales", "crm"] {
        let contacts = SchemaGraph::table(&analyzed, &TableRef::new(Some(schema.into()), "contacts"))
            .expect("contacts");
        let ids: Vec<String> = analyzed.lints(contacts).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["incrementing-columns", "no-indices"], "schema {}", schema);
    }
    assert_eq!(analyzed.lint_count(), 4);
}

#[test]
fn test_scenario_depth_gating() {
    let db = warehouse();

    for level in [InfoLevel::None, InfoLevel::Basic] {
        let analyzed = AnalyzedDatabase::new(&db, level);
        assert_eq!(analyzed.lint_count(), 0);
        for t in analyzed.tables() {
            assert!(analyzed.lints(t).is_empty());
            assert!(analyzed.weak_associations(t).is_empty());
        }
    }

    let lint_only = AnalyzedDatabase::new(&db, InfoLevel::Lint);
    assert_eq!(lint_only.lint_count(), 8);
    assert_eq!(lint_only.summary().weak_associations, 0);

    let maximum = AnalyzedDatabase::new(&db, InfoLevel::Maximum);
    assert_eq!(maximum.lint_count(), 8);
    assert_eq!(maximum.summary().weak_associations, 2);
}

#[test]
fn test_scenario_warehouse_findings() {
    let db = warehouse();
    let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Maximum);

    let items = analyzed.lints(table(&analyzed, "items"));
    let ids: Vec<&str> = items.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["null-intended-columns", "nullable-columns-in-index"]);
    assert_eq!(items[0].value, Some(LintValue::Column("category_id".into())));
    assert_eq!(items[1].value, Some(LintValue::Index("items_label_idx".into())));

    let items_assoc = analyzed.weak_associations(table(&analyzed, "items"));
    assert_eq!(items_assoc.len(), 1);
    assert_eq!(items_assoc[0].target.to_string(), "public.categories.id");

    let audit_assoc = analyzed.weak_associations(table(&analyzed, "audit_log"));
    assert_eq!(audit_assoc.len(), 1);
    assert_eq!(audit_assoc[0].target.to_string(), "public.items.item_id");

    let view = analyzed.lints(table(&analyzed, "item_summary"));
    assert!(view.iter().all(|l| l.id != "no-indices"));

    let summary = analyzed.summary();
    assert_eq!(summary.tables_analyzed, 6);
    assert_eq!(summary.total_lints, 8);
    assert_eq!(summary.lints_by_severity.get(&LintSeverity::High), Some(&3));
    assert_eq!(summary.lints_by_severity.get(&LintSeverity::Medium), Some(&3));
    assert_eq!(summary.lints_by_severity.get(&LintSeverity::Low), Some(&2));
}

#[test]
fn test_scenario_declared_foreign_key_not_reinferred() {
    let db = warehouse();
    let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Maximum);

    for t in analyzed.tables() {
        for map in analyzed.weak_associations(t) {
            assert_ne!(map.source.column, "supplier_id");
            assert_ne!(map.source.table_ref(), map.target.table_ref());
        }
    }
}

#[test]
fn test_scenario_unknown_table_is_empty() {
    let db = shop();
    let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Maximum);

    // Same name, different schema: not part of this graph
    let stranger = orders().with_schema("archive");
    assert!(get_lint(&analyzed, &stranger).is_empty());
    assert!(get_weak_associations(&analyzed, &stranger).is_empty());
}

#[test]
fn test_scenario_missing_database() {
    let result = AnalyzedDatabase::try_new(None, InfoLevel::Lint);
    assert!(matches!(result, Err(SchemaLensError::MissingDatabase)));
}

#[test]
fn test_scenario_configured_run() {
    let db = warehouse();
    let config = AnalysisConfig::new()
        .with_info_level(InfoLevel::Lint)
        .with_lint_config(
            LintConfig::new()
                .with_disabled_rule("no-indices")
                .with_severity_override("single-column-table", LintSeverity::Critical),
        );
    let analyzed = AnalyzedDatabase::with_config(&db, &config).expect("valid config");

    let summary = analyzed.summary();
    assert_eq!(summary.total_lints, 6);
    assert_eq!(summary.lints_by_severity.get(&LintSeverity::Critical), Some(&2));
    assert_eq!(summary.lints_by_severity.get(&LintSeverity::Low), None);
    assert_eq!(summary.weak_associations, 0);
}

#[test]
fn test_scenario_repeat_runs_are_identical() {
    let db = warehouse();
    let first = AnalyzedDatabase::new(&db, InfoLevel::Maximum);
    let second = AnalyzedDatabase::new(&db, InfoLevel::Maximum);

    for t in db.tables() {
        assert_eq!(first.lints(t), second.lints(t));
        assert_eq!(first.weak_associations(t), second.weak_associations(t));
    }
}

#[test]
fn test_scenario_annotated_export() {
    let db = shop();
    let analyzed = AnalyzedDatabase::new(&db, InfoLevel::Maximum);
    let annotated = analyzed.to_annotated_database().expect("export");

    let json = serde_json::to_value(&annotated).expect("serialize");
    let orders = &json["schemas"][0]["tables"][0]["attributes"];
    assert_eq!(orders[LINT_KEY].as_array().map(Vec::len), Some(1));
    assert_eq!(orders[WEAK_ASSOCIATIONS_KEY].as_array().map(Vec::len), Some(1));
    assert_eq!(
        orders[WEAK_ASSOCIATIONS_KEY][0]["target"]["table"],
        serde_json::json!("customers")
    );

    // The source graph is untouched
    assert!(db.schemas[0].tables[0].attributes.is_empty());
}
