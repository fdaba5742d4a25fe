//! Shared schema fixtures for integration tests.

#![allow(dead_code)]

use schemalens_core::models::{
    Column, Database, ForeignKey, Index, PrimaryKey, Schema, Table, UnifiedDataType,
};

pub fn int(name: &str) -> Column {
    Column::new(
        name,
        UnifiedDataType::Integer {
            bits: 64,
            signed: true,
        },
    )
}

pub fn text(name: &str) -> Column {
    Column::new(name, UnifiedDataType::String { max_length: None })
}

/// Table with a single-column primary key as its first column.
pub fn keyed(name: &str, key: &str) -> Table {
    Table::new(name)
        .with_column(int(key))
        .with_primary_key(PrimaryKey::new(None, [key]))
}

pub fn customers() -> Table {
    keyed("customers", "customer_id").with_column(text("name"))
}

pub fn orders() -> Table {
    keyed("orders", "order_id")
        .with_column(int("customer_id"))
        .with_column(int("total"))
}

/// `widget(phone1, phone2)`: no key, no indexes.
pub fn widget() -> Table {
    Table::new("widget")
        .with_column(text("phone1"))
        .with_column(text("phone2"))
}

/// `singleton(id)` with `id` as primary key.
pub fn singleton() -> Table {
    keyed("singleton", "id")
}

pub fn database(tables: impl IntoIterator<Item = Table>) -> Database {
    let schema = tables
        .into_iter()
        .fold(Schema::new("public"), Schema::with_table);
    Database::new("fixture").with_schema(schema)
}

pub fn shop() -> Database {
    database([orders(), customers()])
}

/// A larger graph exercising every rule and a declared foreign key.
pub fn warehouse() -> Database {
    let items = keyed("items", "item_id")
        .with_column(int("category_id"))
        .with_column(int("supplier_id"))
        .with_column(text("label").with_nullable(true))
        .with_index(Index::new("items_label_idx", ["label"]))
        .with_foreign_key(ForeignKey {
            name: Some("items_supplier_fk".into()),
            columns: vec!["supplier_id".into()],
            referenced_table: "suppliers".into(),
            referenced_schema: Some("public".into()),
            referenced_columns: vec!["supplier_id".into()],
        });
    let categories = keyed("categories", "id").with_column(text("title"));
    let suppliers = keyed("suppliers", "supplier_id")
        .with_column(text("address1"))
        .with_column(text("address2"))
        .with_column(text("address3"));
    let audit = Table::new("audit_log")
        .with_column(text("message"))
        .with_column(int("item_id"));
    let tags = Table::new("tags").with_column(text("tag"));
    let summary = Table::new("item_summary").with_column(int("count")).as_view();

    database([items, categories, suppliers, audit, tags, summary])
}
