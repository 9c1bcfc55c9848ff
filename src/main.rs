use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::{LevelFilter, debug, info};
use pipestore::config::Config;
use pipestore::{Record, RecordStore};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

use cli::Cli;
use cli::commands::Commands;

fn setup_logging(cli: &Cli, config: &Config) {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);

    if cli.is_verbose() {
        builder.filter_level(LevelFilter::Debug);
    } else if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    } else if let Some(level) = config.log_level.as_deref() {
        builder.parse_filters(level);
    }

    builder.init();
}

fn resolve_path(cli: &Cli, config: &Config) -> Result<PathBuf> {
    cli.file
        .clone()
        .or_else(|| config.store.path.clone())
        .ok_or_else(|| eyre!("No record file given: pass --file or set store.path in the config"))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string(value).context("Failed to encode JSON output")?);
    Ok(())
}

/// Print an optional line; absent maps to exit status 1.
fn print_line(line: Option<String>, json: bool) -> Result<ExitCode> {
    if json {
        print_json(&serde_json::json!(line))?;
    } else if let Some(line) = &line {
        println!("{}", line);
    }
    Ok(if line.is_some() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn run_application(cli: &Cli, store: &RecordStore) -> Result<ExitCode> {
    info!("Running {:?} on {}", cli.command, store.path().display());
    let path = store.path().display().to_string();

    match &cli.command {
        Commands::Append { line } => {
            store.append(line).context(format!("Failed to append to {}", path))?;
        }
        Commands::AppendFields { fields } => {
            let record = Record::from_fields(fields.iter().cloned());
            store
                .append_record(&record)
                .context(format!("Failed to append to {}", path))?;
        }
        Commands::Read => {
            let records = store.read_all().context(format!("Failed to read {}", path))?;
            if cli.json {
                print_json(&serde_json::to_value(&records)?)?;
            } else {
                for record in &records {
                    println!("{}", record);
                }
            }
        }
        Commands::Last => {
            let line = store.read_last_line().context(format!("Failed to read {}", path))?;
            return print_line(line, cli.json);
        }
        Commands::Find { value } => {
            let line = store.find_by_value(value).context(format!("Failed to search {}", path))?;
            return print_line(line, cli.json);
        }
        Commands::Update { old, new } => {
            let changed = store.update(old, new).context(format!("Failed to update {}", path))?;
            if cli.json {
                print_json(&serde_json::json!({ "updated": changed }))?;
            } else {
                println!("{} {} line(s)", "Updated".green(), changed);
            }
        }
        Commands::Delete { value } => {
            let removed = store.delete(value).context(format!("Failed to delete from {}", path))?;
            if cli.json {
                print_json(&serde_json::json!({ "deleted": removed }))?;
            } else {
                println!("{} {} line(s)", "Deleted".red(), removed);
            }
        }
        Commands::Count => {
            let count = store.count_elements().context(format!("Failed to count {}", path))?;
            if cli.json {
                print_json(&serde_json::json!(count))?;
            } else {
                println!("{}", count);
            }
        }
        Commands::Clear => {
            store.clear().context(format!("Failed to clear {}", path))?;
            if !cli.json {
                println!("{} {}", "Cleared".yellow(), path);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Logging level can come from config, so it is set up second
    setup_logging(&cli, &config);
    debug!("Config: {:?}", config);

    let path = resolve_path(&cli, &config)?;
    let store = RecordStore::with_options(path, config.store.options.clone());

    run_application(&cli, &store).context("Application failed")
}
