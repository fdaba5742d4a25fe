//! Read-only view over a crawled schema graph.
//!
//! Both the plain [`Database`] and the analyzed facade implement this trait,
//! so report code can accept either.

use serde_json::Value;

use crate::attributes::Attributes;
use crate::models::{Database, DatabaseInfo, DriverInfo, Schema, Table, TableRef};

/// Read access to a database's metadata.
pub trait SchemaGraph {
    /// Database name.
    fn name(&self) -> &str;

    /// Product information.
    fn database_info(&self) -> &DatabaseInfo;

    /// Driver information.
    fn driver_info(&self) -> &DriverInfo;

    /// All schemas, in crawl order.
    fn schemas(&self) -> &[Schema];

    /// Database-level attributes.
    fn attributes(&self) -> &Attributes;

    /// Looks up a schema by name.
    fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas().iter().find(|s| s.name == name)
    }

    /// Every table of every schema, in schema then table order.
    fn tables(&self) -> Vec<&Table> {
        self.schemas().iter().flat_map(|s| s.tables.iter()).collect()
    }

    /// Looks up a table by identity.
    fn table(&self, table: &TableRef) -> Option<&Table> {
        self.schemas()
            .iter()
            .flat_map(|s| s.tables.iter())
            .find(|t| t.name == table.table && t.schema == table.schema)
    }

    /// Looks up a single database-level attribute.
    fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes().get(key)
    }
}

impl SchemaGraph for Database {
    fn name(&self) -> &str {
        &self.name
    }

    fn database_info(&self) -> &DatabaseInfo {
        &self.database_info
    }

    fn driver_info(&self) -> &DriverInfo {
        &self.driver_info
    }

    fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
