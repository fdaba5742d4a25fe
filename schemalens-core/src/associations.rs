//! Weak-association inference.
//!
//! Finds column pairs across tables that look like foreign keys by naming
//! convention but are not declared as constraints. Unlike the lint rules,
//! this pass needs the complete table set before it can start.
//!
//! A column `c` of table A is taken to reference table B when:
//! - `c` is `<B>_id` or `<B>id`, with B's name also tried in singular form,
//!   and the implied target is B's single-column primary key (or B's key
//!   column named `id`); or
//! - `c` has the same name as B's single-column primary key, and that name
//!   is not the generic `id`.
//!
//! The target must be part of B's primary or unique key and share a type
//! class with `c`. Declared foreign keys are never re-reported, and a table
//! is never associated with itself.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::attributes::AttributeStore;
use crate::models::{Column, ColumnMap, ColumnRef, Table, TableRef};
use crate::naming::{longest_common_substring, normalize, reference_stem, singular};

/// One accepted target for a referencing column.
#[derive(Debug)]
struct Candidate<'a> {
    table: usize,
    target: &'a Column,
}

/// Lookup structures over the full table set.
#[derive(Debug)]
struct TableIndex<'a> {
    tables: Vec<&'a Table>,
    /// Normalized table name, plural and singular, to table positions
    by_name: HashMap<String, Vec<usize>>,
    /// Normalized single-column primary key name to table positions
    by_key_name: HashMap<String, Vec<usize>>,
    /// Declared foreign key pairs, in both directions
    declared: HashSet<(ColumnRef, ColumnRef)>,
}

impl<'a> TableIndex<'a> {
    fn build(tables: Vec<&'a Table>) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_key_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut declared = HashSet::new();

        for (position, table) in tables.iter().enumerate() {
            let name = normalize(&table.name);
            let mut names = vec![singular(&name), name];
            names.dedup();
            for name in names {
                by_name.entry(name).or_default().push(position);
            }

            if let Some(key) = table.primary_key.as_ref().and_then(|pk| pk.single_column()) {
                let key = normalize(key);
                if key != "id" {
                    by_key_name.entry(key).or_default().push(position);
                }
            }

            for map in table.foreign_key_column_maps() {
                declared.insert((map.target.clone(), map.source.clone()));
                declared.insert((map.source, map.target));
            }
        }

        Self {
            tables,
            by_name,
            by_key_name,
            declared,
        }
    }

    /// Names under which a column could refer to another table.
    fn stems(column: &Column) -> Vec<String> {
        let normalized = normalize(&column.name);
        let mut stems = Vec::new();
        if let Some(stem) = reference_stem(&column.name) {
            stems.push(stem);
        }
        if let Some(stem) = normalized.strip_suffix("id") {
            if !stem.is_empty() && !stem.ends_with('_') && !stems.iter().any(|s| s == stem) {
                stems.push(stem.to_string());
            }
        }
        stems
    }

    /// The key column of `table` a `<table>_id` column would point at.
    fn implied_target(table: &'a Table) -> Option<&'a Column> {
        match table.primary_key.as_ref().and_then(|pk| pk.single_column()) {
            Some(key) => table.column(key),
            None => table.column("id").filter(|c| table.is_key_column(&c.name)),
        }
    }

    /// Collects every acceptable target for `column` of the table at `source`.
    fn candidates(&self, source: usize, column: &Column, stems: &[String]) -> Vec<Candidate<'a>> {
        let source_table = self.tables[source];
        let source_ref = source_table.table_ref();
        let mut found: BTreeMap<usize, Candidate<'a>> = BTreeMap::new();

        let by_name = stems
            .iter()
            .filter_map(|stem| self.by_name.get(stem))
            .flatten()
            .filter_map(|&position| {
                Self::implied_target(self.tables[position]).map(|target| (position, target))
            });
        let by_key = self
            .by_key_name
            .get(&normalize(&column.name))
            .into_iter()
            .flatten()
            .filter_map(|&position| {
                let table = self.tables[position];
                table
                    .primary_key
                    .as_ref()
                    .and_then(|pk| pk.single_column())
                    .and_then(|key| table.column(key))
                    .map(|target| (position, target))
            });

        for (position, target) in by_name.chain(by_key) {
            let target_table = self.tables[position];
            if position == source || target_table.table_ref() == source_ref {
                continue;
            }
            if !self.accepts(source_table, column, target_table, target) {
                continue;
            }
            found.entry(position).or_insert(Candidate {
                table: position,
                target,
            });
        }

        found.into_values().collect()
    }

    fn accepts(&self, source: &Table, column: &Column, target_table: &Table, target: &Column) -> bool {
        if !target_table.is_key_column(&target.name) {
            tracing::trace!(
                "Rejected {}.{} -> {}.{}: target is not a key column",
                source.full_name(),
                column.name,
                target_table.full_name(),
                target.name
            );
            return false;
        }
        if !column.data_type.is_compatible_with(&target.data_type) {
            tracing::trace!(
                "Rejected {}.{} -> {}.{}: incompatible types",
                source.full_name(),
                column.name,
                target_table.full_name(),
                target.name
            );
            return false;
        }
        let pair = (
            source.column_ref(&column.name),
            target_table.column_ref(&target.name),
        );
        !self.declared.contains(&pair)
    }

    /// Picks the candidate whose table name shares the longest substring
    /// with the stem, or none when that best score is tied.
    fn resolve(&self, stem: &str, candidates: Vec<Candidate<'a>>) -> Option<Candidate<'a>> {
        let mut ranked: Vec<(usize, Candidate<'a>)> = candidates
            .into_iter()
            .map(|c| (longest_common_substring(stem, &self.tables[c.table].name), c))
            .collect();

        let best = ranked.iter().map(|(score, _)| *score).max()?;
        ranked.retain(|(score, _)| *score == best);
        if ranked.len() > 1 {
            return None;
        }
        ranked.pop().map(|(_, c)| c)
    }
}

/// Infers undeclared relationships across a complete set of tables.
///
/// # Example
///
/// ```rust
/// use schemalens_core::associations::WeakAssociationsAnalyzer;
/// use schemalens_core::models::{Column, PrimaryKey, Table, UnifiedDataType};
///
/// let int = || UnifiedDataType::Integer { bits: 32, signed: true };
/// let customers = Table::new("customers")
///     .with_column(Column::new("customer_id", int()))
///     .with_primary_key(PrimaryKey::new(None, ["customer_id"]));
/// let orders = Table::new("orders")
///     .with_column(Column::new("order_id", int()))
///     .with_column(Column::new("customer_id", int()))
///     .with_primary_key(PrimaryKey::new(None, ["order_id"]));
///
/// let found = WeakAssociationsAnalyzer::new([&orders, &customers]).analyze();
/// assert_eq!(found[&orders.table_ref()].len(), 1);
/// ```
#[derive(Debug)]
pub struct WeakAssociationsAnalyzer<'a> {
    index: TableIndex<'a>,
}

impl<'a> WeakAssociationsAnalyzer<'a> {
    /// Creates an analyzer over the complete table set.
    pub fn new<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = &'a Table>,
    {
        Self {
            index: TableIndex::build(tables.into_iter().collect()),
        }
    }

    /// Runs the inference, grouping associations by referencing table.
    ///
    /// Tables without associations are absent from the result.
    pub fn analyze(&self) -> BTreeMap<TableRef, Vec<ColumnMap>> {
        let mut result: BTreeMap<TableRef, BTreeSet<ColumnMap>> = BTreeMap::new();

        for (position, table) in self.index.tables.iter().enumerate() {
            for column in &table.columns {
                if let Some(map) = self.associate(position, table, column) {
                    result.entry(table.table_ref()).or_default().insert(map);
                }
            }
        }

        result
            .into_iter()
            .map(|(table, maps)| (table, maps.into_iter().collect()))
            .collect()
    }

    /// Runs the inference and attaches each list to its referencing table.
    /// Returns the number of associations found.
    pub fn analyze_into(&self, store: &mut AttributeStore) -> usize {
        let associations = self.analyze();
        let total: usize = associations.values().map(Vec::len).sum();
        for (table, maps) in associations {
            tracing::debug!("Table '{}': {} weak association(s)", table, maps.len());
            store.set_weak_associations(table, maps);
        }
        tracing::info!(
            "Weak-association pass complete: {} association(s) across {} table(s)",
            total,
            self.index.tables.len()
        );
        total
    }

    fn associate(&self, position: usize, table: &Table, column: &Column) -> Option<ColumnMap> {
        if normalize(&column.name) == "id" || table.foreign_key_for_column(&column.name).is_some() {
            return None;
        }
        let stems = TableIndex::stems(column);
        if stems
            .iter()
            .any(|stem| self.index.by_name.get(stem).is_some_and(|p| p.contains(&position)))
        {
            // The column names its own table: it is this table's identifier
            return None;
        }

        let candidates = self.index.candidates(position, column, &stems);
        if candidates.is_empty() {
            return None;
        }
        let count = candidates.len();
        let stem = stems.first().cloned().unwrap_or_else(|| normalize(&column.name));
        let Some(chosen) = self.index.resolve(&stem, candidates) else {
            tracing::debug!(
                "Dropped ambiguous association for {}.{} ({} equally good targets)",
                table.full_name(),
                column.name,
                count
            );
            return None;
        };

        let target_table = self.index.tables[chosen.table];
        Some(ColumnMap {
            source: table.column_ref(&column.name),
            target: target_table.column_ref(&chosen.target.name),
        })
    }
}
