//! Column and table naming conventions.
//!
//! Both the lint rules and the weak-association analyzer reason about names
//! the same way: case-insensitively, with identifier quoting stripped, and
//! with plural table names matched against singular column stems.

use std::sync::OnceLock;

/// Pre-compiled naming patterns.
struct NamingPatterns {
    /// `<stem>_id`
    reference_suffix: regex::Regex,
    /// `<prefix><digits>` where the prefix does not end in a digit
    numeric_suffix: regex::Regex,
}

impl NamingPatterns {
    fn instance() -> &'static Self {
        static PATTERNS: OnceLock<NamingPatterns> = OnceLock::new();
        PATTERNS.get_or_init(|| Self {
            reference_suffix: regex::Regex::new(r"^(?P<stem>.+)_id$")
                .expect("Invalid reference suffix pattern"),
            numeric_suffix: regex::Regex::new(r"^(?P<prefix>.*[^0-9])(?P<digits>[0-9]+)$")
                .expect("Invalid numeric suffix pattern"),
        })
    }
}

/// Lowercases a name and strips identifier quoting (`"`, `` ` ``, `[]`).
pub fn normalize(name: &str) -> String {
    name.trim()
        .trim_matches(|c| matches!(c, '"' | '`' | '[' | ']'))
        .to_lowercase()
}

/// Returns the stem of a `<stem>_id` column name, normalized.
///
/// `customer_id` yields `customer`; `id`, `_id` and `paid` yield nothing.
pub fn reference_stem(column_name: &str) -> Option<String> {
    let normalized = normalize(column_name);
    NamingPatterns::instance()
        .reference_suffix
        .captures(&normalized)
        .and_then(|caps| caps.name("stem"))
        .map(|stem| stem.as_str().trim_end_matches('_').to_string())
        .filter(|stem| !stem.is_empty())
}

/// Splits a name into a normalized prefix and its trailing digits.
///
/// `phone2` yields `("phone", "2")`; names without a non-digit prefix or
/// without a numeric suffix yield nothing. The digits are kept as text so
/// suffixes of any length are accepted.
pub fn numeric_suffix(name: &str) -> Option<(String, String)> {
    let normalized = normalize(name);
    let caps = NamingPatterns::instance()
        .numeric_suffix
        .captures(&normalized)?;
    let prefix = caps.name("prefix")?.as_str().to_string();
    let digits = caps.name("digits")?.as_str().to_string();
    Some((prefix, digits))
}

/// Best-effort English singular of a normalized table name.
pub fn singular(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    for suffix in ["ses", "xes", "zes", "ches", "shes"] {
        if name.len() > suffix.len() && name.ends_with(suffix) {
            if let Some(stem) = name.strip_suffix("es") {
                return stem.to_string();
            }
        }
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => name.to_string(),
    }
}

/// Checks whether a normalized stem names the table, in plural or singular.
pub fn stem_names_table(stem: &str, table_name: &str) -> bool {
    let table = normalize(table_name);
    stem == table || stem == singular(&table)
}

/// Checks whether a column name is `<table>_id` or `<table>id` for `table_name`.
pub fn column_references_table(column_name: &str, table_name: &str) -> bool {
    let column = normalize(column_name);
    let table = normalize(table_name);
    [table.clone(), singular(&table)]
        .iter()
        .filter(|name| !name.is_empty())
        .any(|name| column == format!("{}_id", name) || column == format!("{}id", name))
}

/// Length of the longest common substring of two names, compared normalized.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    let mut previous = vec![0_usize; b.len().saturating_add(1)];
    let mut best = 0;

    for ca in &a {
        let mut current = vec![0_usize; previous.len()];
        // current[j + 1] extends the run ending at previous[j]
        for ((cb, diagonal), cell) in b.iter().zip(&previous).zip(current.iter_mut().skip(1)) {
            if ca == cb {
                *cell = diagonal.saturating_add(1);
                best = best.max(*cell);
            }
        }
        previous = current;
    }
    best
}
