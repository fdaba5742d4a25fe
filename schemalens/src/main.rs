//! Schema analysis tool.
//!
//! Reads a crawled database snapshot (JSON), runs the lint and
//! weak-association passes over it, and reports the findings. The tool never
//! connects to a database.

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use schemalens_core::logging::{LogFormat, init_logging};
use schemalens_core::models::Database;
use schemalens_core::{AnalysisConfig, AnalyzedDatabase, InfoLevel, LintEngine};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "schemalens")]
#[command(about = "Schema lint and weak-association analysis")]
#[command(version)]
#[command(long_about = "
SchemaLens - Offline schema design analysis

Reads a database snapshot produced by a crawler and reports:
- Lint findings: design smells per table
- Weak associations: relationships implied by column naming but never
  declared as foreign keys

EXAMPLES:
  schemalens analyze --input schema.json
  schemalens analyze --input schema.json --info-level lint --format json
  schemalens analyze --input schema.json --config lint.json --output report.txt
  schemalens rules
")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a database snapshot
    Analyze(AnalyzeArgs),
    /// List the built-in lint rules
    Rules,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Database snapshot to analyze
    #[arg(short, long, help = "Input snapshot file (JSON)")]
    pub input: PathBuf,

    /// Analysis depth
    #[arg(
        long,
        value_parser = parse_info_level,
        help = "Analysis depth: none, basic, lint or maximum [default: from config, else maximum]"
    )]
    pub info_level: Option<InfoLevel>,

    /// Analysis configuration file
    #[arg(short, long, env = "SCHEMALENS_CONFIG", help = "Analysis config file (JSON)")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Output file path
    #[arg(short, long, help = "Write the report here instead of stdout")]
    pub output: Option<PathBuf>,
}

/// Available report formats
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// One line per finding
    Text,
    /// Annotated database snapshot
    Json,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv)"
    )]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true, help = "Suppress all logging except errors")]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long, global = true, help = "Emit log events as JSON lines")]
    pub log_json: bool,
}

fn parse_info_level(value: &str) -> std::result::Result<InfoLevel, String> {
    value.parse().map_err(|e: schemalens_core::SchemaLensError| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format = if cli.global.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_logging(cli.global.verbose, cli.global.quiet, log_format)?;

    match &cli.command {
        Command::Analyze(args) => analyze(args),
        Command::Rules => {
            print!("{}", report::render_rules(&LintEngine::with_default_rules()));
            Ok(())
        }
    }
}

/// Loads the snapshot and config, runs the analysis and writes the report.
fn analyze(args: &AnalyzeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(level) = args.info_level {
        config.info_level = level;
    }

    let database = load_database(&args.input)?;
    info!(
        "Loaded '{}': {} schema(s), {} table(s)",
        database.name,
        database.schemas.len(),
        database.table_count()
    );

    let analyzed = AnalyzedDatabase::with_config(&database, &config)
        .context("Failed to build lint engine from configuration")?;

    let rendered = match args.format {
        ReportFormat::Text => report::render_text(&analyzed),
        ReportFormat::Json => report::render_json(&analyzed)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn load_database(path: &Path) -> Result<Database> {
    debug!("Reading snapshot from {}", path.display());
    Database::load(path).with_context(|| format!("Failed to load snapshot {}", path.display()))
}

fn load_config(path: &Path) -> Result<AnalysisConfig> {
    debug!("Reading analysis config from {}", path.display());
    AnalysisConfig::load(path).with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "schemalens",
            "analyze",
            "--input",
            "schema.json",
            "--info-level",
            "lint",
            "--format",
            "json",
            "-vv",
        ])
        .expect("valid arguments");

        assert_eq!(cli.global.verbose, 2);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input, PathBuf::from("schema.json"));
        assert_eq!(args.info_level, Some(InfoLevel::Lint));
        assert_eq!(args.format, ReportFormat::Json);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_rejects_unknown_info_level() {
        let result = Cli::try_parse_from([
            "schemalens",
            "analyze",
            "--input",
            "schema.json",
            "--info-level",
            "loud",
        ]);
        assert!(result.is_err());
    }
}
