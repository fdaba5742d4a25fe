//! Core data models for the crawled schema graph.
//!
//! These structures are produced by an external crawler and are read-only
//! for the whole analysis pass. Every entity carries an [`Attributes`] bag
//! so callers can hang extra data on it without changing its shape.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;
use crate::error::{Result, SchemaLensError};

/// Unified data type representation across database engines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnifiedDataType {
    /// String/text types with optional length
    String { max_length: Option<u32> },
    /// Integer types with bit width
    Integer { bits: u8, signed: bool },
    /// Floating point types
    Float { precision: Option<u8> },
    /// Fixed-point numeric types
    Decimal {
        precision: Option<u8>,
        scale: Option<u8>,
    },
    /// Boolean type
    Boolean,
    /// Date and time types
    DateTime { with_timezone: bool },
    /// Date only
    Date,
    /// Time only
    Time { with_timezone: bool },
    /// Binary data
    Binary { max_length: Option<u32> },
    /// JSON/JSONB data
    Json,
    /// UUID type
    Uuid,
    /// Array types
    Array { element_type: Box<UnifiedDataType> },
    /// Custom/database-specific types
    Custom { type_name: String },
}

/// Broad family of a data type.
///
/// Two columns can only be related when their types fall into the same
/// class; widths, lengths and signedness are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeClass {
    Numeric,
    Character,
    Temporal,
    Binary,
    Boolean,
    Identifier,
    Structured,
    Other,
}

impl UnifiedDataType {
    /// Returns the type class used for compatibility checks.
    pub fn type_class(&self) -> TypeClass {
        match self {
            Self::Integer { .. } | Self::Float { .. } | Self::Decimal { .. } => TypeClass::Numeric,
            Self::String { .. } => TypeClass::Character,
            Self::DateTime { .. } | Self::Date | Self::Time { .. } => TypeClass::Temporal,
            Self::Binary { .. } => TypeClass::Binary,
            Self::Boolean => TypeClass::Boolean,
            Self::Uuid => TypeClass::Identifier,
            Self::Json | Self::Array { .. } => TypeClass::Structured,
            Self::Custom { .. } => TypeClass::Other,
        }
    }

    /// Checks whether a value of this type could reference a value of `other`.
    ///
    /// Custom types are only compatible with a custom type of the same name.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom { type_name: a }, Self::Custom { type_name: b }) => {
                a.eq_ignore_ascii_case(b)
            }
            _ => {
                let class = self.type_class();
                class != TypeClass::Other && class == other.type_class()
            }
        }
    }
}

/// Kind of relation a table entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    #[default]
    Table,
    View,
}

/// Database column information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: UnifiedDataType,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_part_of_primary_key: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub ordinal_position: u32,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Column {
    /// Creates a non-nullable column of the given type.
    pub fn new(name: impl Into<String>, data_type: UnifiedDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            is_nullable: false,
            is_part_of_primary_key: false,
            default_value: None,
            ordinal_position: 0,
            remarks: None,
            attributes: Attributes::new(),
        }
    }

    /// Builder method to set nullability.
    pub fn with_nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }
}

/// Primary key constraint
///
/// A primary key is always unique, whatever index it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub name: Option<String>,
    pub columns: Vec<String>,
}

impl PrimaryKey {
    /// Creates a primary key over the given columns.
    pub fn new<I, S>(name: Option<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Promotes an index to the primary key, keeping its name and column order.
    pub fn from_index(index: &Index) -> Self {
        Self {
            name: Some(index.name.clone()),
            columns: index.columns.iter().map(|c| c.name.clone()).collect(),
        }
    }

    /// Primary keys are unique by definition.
    pub const fn is_unique(&self) -> bool {
        true
    }

    /// Returns the sole key column, if the key has exactly one.
    pub fn single_column(&self) -> Option<&str> {
        match self.columns.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}

/// Foreign key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub referenced_table: String,
    #[serde(default)]
    pub referenced_schema: Option<String>,
    #[serde(default)]
    pub referenced_columns: Vec<String>,
}

impl ForeignKey {
    /// Expands the constraint into column pairs, owned by `table`.
    ///
    /// An unqualified referenced table is resolved in the owning table's schema.
    pub fn column_maps(&self, table: &Table) -> Vec<ColumnMap> {
        let referenced_schema = self
            .referenced_schema
            .clone()
            .or_else(|| table.schema.clone());

        self.columns
            .iter()
            .zip(&self.referenced_columns)
            .map(|(source, target)| ColumnMap {
                source: ColumnRef::new(table.schema.clone(), &table.name, source),
                target: ColumnRef::new(
                    referenced_schema.clone(),
                    &self.referenced_table,
                    target,
                ),
            })
            .collect()
    }
}

/// Database index information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<IndexColumn>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub is_primary: bool,
}

impl Index {
    /// Creates a non-unique index over the given columns.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns
                .into_iter()
                .map(|c| IndexColumn {
                    name: c.into(),
                    sort_order: None,
                })
                .collect(),
            is_unique: false,
            is_primary: false,
        }
    }

    /// Builder method to mark the index unique.
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Column names in index order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// Index column with ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
}

/// Sort order for index columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Identity of a table within one database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableRef {
    pub schema: Option<String>,
    pub table: String,
}

impl TableRef {
    /// Creates a table reference.
    pub fn new(schema: Option<String>, table: impl Into<String>) -> Self {
        Self {
            schema,
            table: table.into(),
        }
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

/// Identity of a column within one database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnRef {
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    /// Creates a column reference.
    pub fn new(schema: Option<String>, table: &str, column: &str) -> Self {
        Self {
            schema,
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// Reference to the table holding this column.
    pub fn table_ref(&self) -> TableRef {
        TableRef::new(self.schema.clone(), &self.table)
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table_ref(), self.column)
    }
}

/// A relationship between a referencing column and the key column it points at.
///
/// Used both for declared foreign keys and for inferred weak associations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnMap {
    /// The referencing column
    pub source: ColumnRef,
    /// The referenced key column
    pub target: ColumnRef,
}

impl std::fmt::Display for ColumnMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Database table information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub table_type: TableType,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_key: Option<PrimaryKey>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Table {
    /// Creates an empty base table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            table_type: TableType::Table,
            columns: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            remarks: None,
            attributes: Attributes::new(),
        }
    }

    /// Builder method to set the owning schema.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Builder method to mark the table as a view.
    pub fn as_view(mut self) -> Self {
        self.table_type = TableType::View;
        self
    }

    /// Builder method to append a column, assigning the next ordinal position.
    pub fn with_column(mut self, mut column: Column) -> Self {
        let next = u32::try_from(self.columns.len()).unwrap_or(u32::MAX);
        column.ordinal_position = next.saturating_add(1);
        if let Some(pk) = &self.primary_key {
            column.is_part_of_primary_key |= pk.columns.contains(&column.name);
        }
        self.columns.push(column);
        self
    }

    /// Builder method to declare the primary key and flag its columns.
    pub fn with_primary_key(mut self, primary_key: PrimaryKey) -> Self {
        for column in &mut self.columns {
            if primary_key.columns.contains(&column.name) {
                column.is_part_of_primary_key = true;
            }
        }
        self.primary_key = Some(primary_key);
        self
    }

    /// Builder method to add an index.
    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Builder method to add a foreign key.
    pub fn with_foreign_key(mut self, foreign_key: ForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }

    /// Stable identity of this table.
    pub fn table_ref(&self) -> TableRef {
        TableRef::new(self.schema.clone(), &self.name)
    }

    /// Stable identity of one of this table's columns.
    pub fn column_ref(&self, column: &str) -> ColumnRef {
        ColumnRef::new(self.schema.clone(), &self.name, column)
    }

    /// Fully qualified name, `schema.table` when the schema is known.
    pub fn full_name(&self) -> String {
        self.table_ref().to_string()
    }

    /// Returns true for views.
    pub fn is_view(&self) -> bool {
        self.table_type == TableType::View
    }

    /// Looks up a column by name, preferring an exact match over a
    /// case-insensitive one.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
    }

    /// Checks whether a column belongs to the primary key.
    pub fn is_primary_key_column(&self, name: &str) -> bool {
        self.primary_key
            .as_ref()
            .is_some_and(|pk| pk.columns.iter().any(|c| c.eq_ignore_ascii_case(name)))
            || self
                .column(name)
                .is_some_and(|c| c.is_part_of_primary_key)
    }

    /// Checks whether an index is the one backing the primary key.
    pub fn is_primary_key_index(&self, index: &Index) -> bool {
        if index.is_primary {
            return true;
        }
        let Some(pk) = &self.primary_key else {
            return false;
        };
        if pk.name.as_deref() == Some(index.name.as_str()) {
            return true;
        }
        index.is_unique
            && index.columns.len() == pk.columns.len()
            && index
                .column_names()
                .zip(&pk.columns)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    /// Returns true when the table has a primary key or at least one index.
    pub fn has_indexes(&self) -> bool {
        self.primary_key.is_some() || !self.indexes.is_empty()
    }

    /// Checks whether a column is part of the primary key or of a unique index.
    pub fn is_key_column(&self, name: &str) -> bool {
        self.is_primary_key_column(name)
            || self
                .indexes
                .iter()
                .filter(|index| index.is_unique)
                .any(|index| index.column_names().any(|c| c.eq_ignore_ascii_case(name)))
    }

    /// Returns the first declared foreign key that includes the column.
    pub fn foreign_key_for_column(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.columns.iter().any(|c| c.eq_ignore_ascii_case(name)))
    }

    /// Expands every declared foreign key into column pairs.
    pub fn foreign_key_column_maps(&self) -> Vec<ColumnMap> {
        self.foreign_keys
            .iter()
            .flat_map(|fk| fk.column_maps(self))
            .collect()
    }
}

/// Database schema (namespace) information
///
/// Tables take their schema from the enclosing `Schema`, both when built
/// with [`Schema::with_table`] and when deserialized; a table's own
/// `schema` field is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SchemaRecord")]
pub struct Schema {
    pub name: String,
    pub tables: Vec<Table>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

/// Serialized form of [`Schema`] before its tables are stamped.
#[derive(Deserialize)]
struct SchemaRecord {
    name: String,
    #[serde(default)]
    tables: Vec<Table>,
    #[serde(default)]
    attributes: Attributes,
}

impl From<SchemaRecord> for Schema {
    fn from(record: SchemaRecord) -> Self {
        let schema = Self {
            name: record.name,
            tables: Vec::with_capacity(record.tables.len()),
            attributes: record.attributes,
        };
        record.tables.into_iter().fold(schema, Self::with_table)
    }
}

impl Schema {
    /// Creates an empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Builder method to add a table, stamping it with this schema's name.
    pub fn with_table(mut self, mut table: Table) -> Self {
        table.schema = Some(self.name.clone());
        self.tables.push(table);
        self
    }

    /// Looks up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Database product information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub product_name: String,
    #[serde(default)]
    pub product_version: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// Driver used by the crawler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInfo {
    pub driver_name: String,
    #[serde(default)]
    pub driver_version: Option<String>,
    /// Connection URL, already redacted by the crawler
    #[serde(default)]
    pub connection_url: Option<String>,
}

/// Complete crawled database: the schema graph analysis runs over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    #[serde(default)]
    pub database_info: DatabaseInfo,
    #[serde(default)]
    pub driver_info: DriverInfo,
    #[serde(default)]
    pub schemas: Vec<Schema>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Database {
    /// Creates an empty database graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database_info: DatabaseInfo::default(),
            driver_info: DriverInfo::default(),
            schemas: Vec::new(),
            attributes: Attributes::new(),
        }
    }

    /// Parses a crawled snapshot from JSON.
    ///
    /// # Errors
    /// Returns a serialization error if the document is not a valid snapshot.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SchemaLensError::serialization("Failed to parse database snapshot", e))
    }

    /// Reads and parses a crawled snapshot file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or a serialization
    /// error if its contents are not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            SchemaLensError::io(format!("Failed to read snapshot {}", path.display()), e)
        })?;
        Self::from_json_str(&data)
    }

    /// Builder method to add a schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Iterates every table of every schema, in schema then table order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.schemas.iter().flat_map(|s| s.tables.iter())
    }

    /// Looks up a table by its identity.
    pub fn table(&self, table: &TableRef) -> Option<&Table> {
        self.tables()
            .find(|t| t.name == table.table && t.schema == table.schema)
    }

    /// Total number of tables across all schemas.
    pub fn table_count(&self) -> usize {
        self.schemas.iter().map(|s| s.tables.len()).sum()
    }
}
