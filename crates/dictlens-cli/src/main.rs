use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dictlens_catalog::{
    DictionarySource, HistoryStore, InMemoryHistory, SearchHistoryEntry, SnapshotFileSource,
};
use dictlens_core::{Config, LookupReport, Notice, NoticeCode, Severity};
use dictlens_engine::{Lookup, LookupEngine, LookupRequest, MatchPass, SessionState, FIELD_HEADER};

/// Environment variable naming the catalog snapshot
const SNAPSHOT_ENV: &str = "DICTLENS_SNAPSHOT";

/// dictlens - data dictionary lookup
#[derive(Parser)]
#[command(name = "dictlens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: dictlens.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog snapshot (overrides DICTLENS_SNAPSHOT and the config file)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what the snapshot contains
    Summary,

    /// Look up tables and show their fields and indexes
    Lookup {
        /// Table references (physical or logical, optionally OWNER.NAME)
        #[arg(required = true)]
        tables: Vec<String>,

        /// Fields to show, separated by commas or whitespace (default: all)
        #[arg(short, long, default_value = "")]
        fields: String,

        /// Write the lookup report as JSON
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Print the search history after the lookups
        #[arg(long)]
        history: bool,
    },

    /// Print the field grid as tab-separated text
    ExportFields {
        /// Table reference
        table: String,

        /// Fields to export (default: all)
        #[arg(short, long, default_value = "")]
        fields: String,
    },

    /// Print the index block of a table
    ExportIndexes {
        /// Table reference
        table: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.verbose)?;
    let snapshot_path = resolve_snapshot_path(cli.snapshot, &config)?;

    if cli.verbose {
        eprintln!("{} {}", "Loading snapshot from:".cyan(), snapshot_path.display());
    }

    let engine = load_engine(&snapshot_path, &config).await?;

    match cli.command {
        Commands::Summary => summary_command(&engine, &snapshot_path),
        Commands::Lookup {
            tables,
            fields,
            json,
            history,
        } => lookup_command(&engine, &config, &tables, &fields, json.as_deref(), history).await,
        Commands::ExportFields { table, fields } => export_fields_command(&engine, &table, &fields),
        Commands::ExportIndexes { table } => export_indexes_command(&engine, &table),
    }
}

/// Log to stderr; RUST_LOG wins over --verbose
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    let config = if let Some(config_path) = path {
        Config::from_file(config_path)?
    } else if Path::new("dictlens.toml").exists() {
        Config::from_file(Path::new("dictlens.toml"))?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    Ok(config)
}

/// --snapshot, then DICTLENS_SNAPSHOT, then the config file
fn resolve_snapshot_path(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    flag.or_else(|| std::env::var_os(SNAPSHOT_ENV).map(PathBuf::from))
        .or_else(|| config.snapshot_path())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No catalog snapshot configured. Pass --snapshot, set {} \
                 or add `snapshot = \"...\"` to dictlens.toml.",
                SNAPSHOT_ENV
            )
        })
}

async fn load_engine(path: &Path, config: &Config) -> Result<LookupEngine> {
    let source = SnapshotFileSource::new(path);

    source
        .test_connection()
        .await
        .with_context(|| format!("Cannot open catalog snapshot {}", path.display()))?;

    let snapshot = source.fetch_snapshot().await?;

    Ok(LookupEngine::new(snapshot).with_config(config.lookup.clone()))
}

/// Summary command - what the snapshot holds
fn summary_command(engine: &LookupEngine, path: &Path) -> Result<()> {
    let snapshot = engine.snapshot();
    let tables: BTreeSet<&str> = snapshot
        .dictionary
        .iter()
        .map(|row| row.physical_table.as_str())
        .collect();

    print_banner("Catalog Snapshot");

    println!("{} {}", "Snapshot:".bold(), path.display());
    println!("{}", snapshot.summary().to_string().green());
    println!("  Tables:        {}", tables.len());
    println!("  Index columns: {}", snapshot.index_columns.len());

    println!();
    println!("{}", "=".repeat(60).bright_blue());

    Ok(())
}

/// Lookup command - one session, one submission per table reference
async fn lookup_command(
    engine: &LookupEngine,
    config: &Config,
    tables: &[String],
    fields: &str,
    json: Option<&Path>,
    show_history: bool,
) -> Result<()> {
    let history = InMemoryHistory::new();
    let mut recordings = Vec::new();
    let mut reports = Vec::new();
    let mut failed = false;
    let mut session = SessionState::default();

    for table in tables {
        let request = LookupRequest::new(table.clone()).with_fields(fields);
        session = session.submit(engine, request);

        match &session {
            SessionState::Resolved(lookup) => {
                print_lookup(lookup);
                reports.push(lookup.to_report());

                if config.history.enabled {
                    let store = history.clone();
                    let entry = SearchHistoryEntry::new(
                        lookup.context.physical_table.clone(),
                        lookup.context.logical_table.clone(),
                    );
                    recordings.push(tokio::spawn(async move { store.record(entry).await }));
                }
            }
            SessionState::Failed { request, error } => {
                print_notice(&error.to_notice());
                reports.push(error.to_report(&request.table));
                failed = true;
            }
            SessionState::Idle => {}
        }
    }

    // History failures never fail the lookup
    for recording in recordings {
        match recording.await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "could not record search"),
            Err(e) => tracing::warn!(error = %e, "history task failed"),
        }
    }

    if let Some(path) = json {
        save_reports(&reports, path)?;
        eprintln!("{} {}", "Report saved to:".green(), path.display());
    }

    if show_history {
        print_history(&history).await?;
    }

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

/// One table writes a single report, several tables write an array
fn save_reports(reports: &[LookupReport], path: &Path) -> Result<()> {
    match reports {
        [report] => report.save_to_file(path)?,
        _ => std::fs::write(path, serde_json::to_string_pretty(reports)?)?,
    }

    Ok(())
}

/// Export-fields command - tab-separated field grid on stdout
fn export_fields_command(engine: &LookupEngine, table: &str, fields: &str) -> Result<()> {
    let lookup = match engine.lookup(&LookupRequest::new(table).with_fields(fields)) {
        Ok(lookup) => lookup,
        Err(e) => {
            print_notice(&e.to_notice());
            std::process::exit(1);
        }
    };

    print!("{}", lookup.fields_text());

    Ok(())
}

/// Export-indexes command - index block on stdout
fn export_indexes_command(engine: &LookupEngine, table: &str) -> Result<()> {
    let lookup = match engine.lookup(&LookupRequest::new(table)) {
        Ok(lookup) => lookup,
        Err(e) => {
            print_notice(&e.to_notice());
            std::process::exit(1);
        }
    };

    match lookup.indexes_text() {
        Ok(text) => print!("{}", text),
        Err(e) => {
            print_notice(
                &Notice::new(NoticeCode::NothingToExport, e.to_string())
                    .with_subject(lookup.context.physical_table.clone()),
            );
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", title.bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();
}

/// Print both grids of a resolved lookup
fn print_lookup(lookup: &Lookup) {
    print_banner(&format!(
        "{} - {}",
        lookup.context.physical_table, lookup.context.logical_table
    ));

    if matches!(lookup.pass, MatchPass::Substring) {
        println!(
            "{} {}",
            "Partial match for:".yellow(),
            lookup.request.table.trim()
        );
        println!();
    }

    println!("{}", "Fields:".bold());
    print_field_grid(lookup);
    println!();

    println!("{}", "Indexes:".bold());
    if lookup.context.indexes.is_empty() {
        println!("  {}", "No indexes".dimmed());
    } else {
        for group in lookup.context.indexes.groups() {
            println!(
                "  {} ({})",
                group.index.index_name.cyan(),
                group.index.uniqueness
            );
            for column in &group.columns {
                println!("    {}. {}", column.position_label(), column.column_name);
            }
        }
    }

    let notices: Vec<Notice> = lookup
        .notices()
        .into_iter()
        .filter(|n| n.code != NoticeCode::NoIndexes)
        .collect();

    if !notices.is_empty() {
        println!();
        for notice in &notices {
            print_notice(notice);
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}

/// Aligned field grid, missing rows highlighted
fn print_field_grid(lookup: &Lookup) {
    let mut widths = FIELD_HEADER.map(str::len);
    for field in &lookup.fields {
        for (width, cell) in widths.iter_mut().zip(field.row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = FIELD_HEADER
        .iter()
        .zip(widths)
        .map(|(title, width)| format!("{:<width$}", title, width = width))
        .collect();
    println!("  {}", header.join("  ").bold());

    for field in &lookup.fields {
        let line: Vec<String> = field
            .row
            .cells()
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        let line = line.join("  ");

        if field.is_missing() {
            println!("  {}", line.red());
        } else {
            println!("  {}", line);
        }
    }
}

fn print_notice(notice: &Notice) {
    let severity_str = match notice.severity {
        Severity::Error => "ERROR".red().bold(),
        Severity::Warn => "WARN".yellow().bold(),
        Severity::Info => "INFO".cyan(),
    };

    eprintln!("  [{}] {}: {}", severity_str, notice.code, notice.message);

    if !notice.candidates.is_empty() {
        eprintln!("    Candidates:");
        for candidate in &notice.candidates {
            eprintln!("      - {}", candidate);
        }
    }
}

async fn print_history(history: &InMemoryHistory) -> Result<()> {
    let entries = history.entries().await?;

    println!();
    println!("{}", "Search history:".bold());
    if entries.is_empty() {
        println!("  {}", "(empty)".dimmed());
    }
    for entry in &entries {
        println!("  {}", entry);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn snapshot_flag_wins_over_config() {
        let config = Config::from_toml("snapshot = \"from-config.json\"").unwrap();
        let path = resolve_snapshot_path(Some(PathBuf::from("flag.json")), &config).unwrap();
        assert_eq!(path, PathBuf::from("flag.json"));
    }

    #[test]
    fn lookup_accepts_several_tables() {
        let cli = Cli::try_parse_from([
            "dictlens", "--snapshot", "catalog.json", "lookup", "ORDERS", "APP.CUSTOMERS",
            "--fields", "ID, NAME",
        ])
        .unwrap();

        match cli.command {
            Commands::Lookup { tables, fields, .. } => {
                assert_eq!(tables, vec!["ORDERS", "APP.CUSTOMERS"]);
                assert_eq!(fields, "ID, NAME");
            }
            _ => panic!("expected lookup"),
        }
    }
}
