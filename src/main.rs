use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod availability;
mod batch;
mod cli;
mod commands;
mod config;
mod directory;

use cli::{Cli, Commands};
use config::{Config, LogLevel};

fn setup_logging(log_level: &LogLevel) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plates")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("plates.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.as_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Add {
            name,
            status,
            category,
            location,
            cuisine,
            venue_id,
            notes,
            price,
            rating,
        } => commands::add::run(
            &name, status, category, &location, &cuisine, venue_id, &notes, &price, &rating, &config,
        ),
        Commands::List {
            status,
            category,
            simple,
            format,
        } => commands::list::run(status, category, simple, cli::OutputFormat::resolve(format), &config),
        Commands::Search { query, format } => {
            commands::search::run(&query, cli::OutputFormat::resolve(format), &config)
        }
        Commands::Move { name, from, to } => commands::mv::run(&name, from, to, &config),
        Commands::Remove { name } => commands::remove::run(&name, &config),
        Commands::Stats { format } => commands::stats::run(cli::OutputFormat::resolve(format), &config),
        Commands::Check {
            date,
            status,
            category,
            party_size,
            max_time,
            file,
            delay_ms,
            concise,
        } => commands::check::run(
            &date, status, category, party_size, &max_time, file, delay_ms, concise, &config,
        ),
        Commands::Venue { action } => commands::venue::run(action, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with log level from config (or RUST_LOG env var)
    setup_logging(&config.log_level).context("Failed to setup logging")?;

    info!("Starting plates with config from: {:?}", cli.config);

    run(cli, config)
}
