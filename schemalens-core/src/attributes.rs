//! Attribute storage for schema entities and analysis results.
//!
//! Two layers live here:
//! - [`Attributes`]: the free-form, string-keyed bag every schema entity
//!   carries. Reads take a default so an absent key is never an error.
//! - [`AttributeStore`]: the typed side-table the analysis pass writes into,
//!   keyed by table identity. The schema graph itself stays untouched.
//!
//! Results only reach an entity's [`Attributes`] when they are explicitly
//! exported, under the reserved [`LINT_KEY`] and [`WEAK_ASSOCIATIONS_KEY`].

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SchemaLensError};
use crate::lint::Lint;
use crate::models::{ColumnMap, TableRef};

/// Attribute key holding a table's exported lint findings.
pub const LINT_KEY: &str = "schemalens.lint";

/// Attribute key holding a table's exported weak associations.
pub const WEAK_ASSOCIATIONS_KEY: &str = "schemalens.weak-associations";

/// Database attribute key recording the info level an export was produced at.
pub const INFO_LEVEL_KEY: &str = "schemalens.info-level";

/// String-keyed attribute bag attached to a schema entity.
///
/// Keys iterate in sorted order so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Value>);

impl Attributes {
    /// Creates an empty attribute bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value under `key` decoded as `T`, or `default` when the
    /// key is absent or holds something that does not decode as `T`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.0.get(key) {
            Some(value) => T::deserialize(value).unwrap_or(default),
            None => default,
        }
    }

    /// Stores a value, replacing whatever was under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Serializes and stores a structured value.
    ///
    /// # Errors
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn set_serialized<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> Result<()> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| {
            SchemaLensError::serialization(format!("Failed to encode attribute '{}'", key), e)
        })?;
        self.0.insert(key, value);
        Ok(())
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Checks whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of stored attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no attributes are stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Analysis results attached to one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAttributes {
    /// Findings in the order rules appended them
    pub lints: Vec<Lint>,
    /// Inferred associations where this table holds the referencing column
    pub weak_associations: Vec<ColumnMap>,
}

impl TableAttributes {
    /// Lint findings sorted by their total order.
    pub fn sorted_lints(&self) -> Vec<Lint> {
        let mut lints = self.lints.clone();
        lints.sort();
        lints
    }

    /// Writes these results into an entity's attribute bag under the
    /// reserved keys. Empty results are written as empty lists.
    ///
    /// # Errors
    /// Returns an error if the results cannot be encoded.
    pub fn export_into(&self, attributes: &mut Attributes) -> Result<()> {
        attributes.set_serialized(LINT_KEY, &self.sorted_lints())?;
        attributes.set_serialized(WEAK_ASSOCIATIONS_KEY, &self.weak_associations)?;
        Ok(())
    }
}

/// Typed side-table of analysis results, keyed by table identity.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    tables: HashMap<TableRef, TableAttributes>,
}

impl AttributeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the results recorded for `table`, if any.
    pub fn get(&self, table: &TableRef) -> Option<&TableAttributes> {
        self.tables.get(table)
    }

    /// Returns the mutable results entry for `table`, creating it if needed.
    pub fn entry(&mut self, table: TableRef) -> &mut TableAttributes {
        self.tables.entry(table).or_default()
    }

    /// Lint findings recorded for `table`; empty when there are none.
    pub fn lints(&self, table: &TableRef) -> &[Lint] {
        self.get(table)
            .map(|attrs| attrs.lints.as_slice())
            .unwrap_or_default()
    }

    /// Weak associations recorded for `table`; empty when there are none.
    pub fn weak_associations(&self, table: &TableRef) -> &[ColumnMap] {
        self.get(table)
            .map(|attrs| attrs.weak_associations.as_slice())
            .unwrap_or_default()
    }

    /// Appends findings to the table's lint list.
    pub fn append_lints(&mut self, table: TableRef, lints: Vec<Lint>) {
        self.entry(table).lints.extend(lints);
    }

    /// Attaches a table's weak associations, replacing any previous list.
    pub fn set_weak_associations(&mut self, table: TableRef, associations: Vec<ColumnMap>) {
        self.entry(table).weak_associations = associations;
    }

    /// Number of tables with an entry.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterates all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&TableRef, &TableAttributes)> {
        self.tables.iter()
    }
}
