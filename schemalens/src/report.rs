//! Report rendering for analysis results.

use anyhow::{Context, Result};
use schemalens_core::{AnalyzedDatabase, LintEngine, SchemaGraph};

/// Renders one line per lint finding and weak association, grouped by
/// table, followed by a summary line. Tables without results are omitted.
pub fn render_text(analyzed: &AnalyzedDatabase<'_>) -> String {
    let summary = analyzed.summary();
    let mut lines = vec![format!(
        "Database: {} ({} tables, info level {})",
        analyzed.name(),
        summary.tables_analyzed,
        summary.info_level
    )];

    for table in analyzed.tables() {
        let lints = analyzed.lints(table);
        let associations = analyzed.weak_associations(table);
        if lints.is_empty() && associations.is_empty() {
            continue;
        }
        lines.push(table.full_name());
        lines.extend(lints.iter().map(|lint| format!("  {}", lint)));
        lines.extend(
            associations
                .iter()
                .map(|association| format!("  weak association: {}", association)),
        );
    }

    let severities: String = summary
        .lints_by_severity
        .iter()
        .rev()
        .map(|(severity, count)| format!(", {} {}", count, severity))
        .collect();
    lines.push(format!(
        "Summary: {} lint finding(s), {} weak association(s){}",
        summary.total_lints, summary.weak_associations, severities
    ));

    finish(&lines)
}

/// Renders the annotated database as pretty-printed JSON.
pub fn render_json(analyzed: &AnalyzedDatabase<'_>) -> Result<String> {
    let annotated = analyzed
        .to_annotated_database()
        .context("Failed to export analysis results")?;
    let mut json =
        serde_json::to_string_pretty(&annotated).context("Failed to serialize annotated database")?;
    json.push('\n');
    Ok(json)
}

/// Renders the registered rules, one per line, in execution order.
pub fn render_rules(engine: &LintEngine) -> String {
    let width = engine.rules().map(|rule| rule.id().len()).max().unwrap_or(0);
    let lines: Vec<String> = engine
        .rules()
        .map(|rule| {
            format!(
                "{:<width$}  {:<8}  {}",
                rule.id(),
                rule.severity().to_string(),
                rule.description(),
                width = width
            )
        })
        .collect();
    finish(&lines)
}

/// Joins report lines, terminating each with a newline.
fn finish(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
