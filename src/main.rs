use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use tokmerge::config::{self, Config};
use tokmerge::driver::{self, Output, RunSummary};

/// Start logging before config is loaded so config fallbacks are recorded.
///
/// Returns true when RUST_LOG is unset and the config's `log-level` may
/// still adjust the level.
fn setup_logging() -> Result<bool> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tokmerge")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tokmerge.log");

    // Setup env_logger with file output so stdout stays clean for --dry-run and css
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let rust_log = std::env::var("RUST_LOG").ok();
    let mut builder = env_logger::Builder::new();
    match &rust_log {
        Some(filters) => {
            builder.parse_filters(filters);
        }
        // Let log::max_level decide until the config is read
        None => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.target(env_logger::Target::Pipe(target)).init();
    if rust_log.is_none() {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(rust_log.is_none())
}

fn apply_log_level(config: &Config) {
    match config.log_level.as_deref().map(str::parse::<LevelFilter>) {
        Some(Ok(level)) => log::set_max_level(level),
        Some(Err(_)) => log::warn!("Ignoring unknown log-level {:?}", config.log_level),
        None => {}
    }
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
        eprintln!("  base:      {}", config.paths.base.display());
        eprintln!("  namespace: {}", config.merge.namespace);
    }

    match &cli.command {
        None | Some(Commands::Colors { .. }) => {
            let summary = driver::run_colors(config, cli.dry_run).context("Color merge failed")?;
            report(&summary, &config.merge.namespace.to_string());
        }
        Some(Commands::Passthrough) => {
            let summary = driver::run_passthrough(config, cli.dry_run).context("Passthrough merge failed")?;
            report(&summary, &config.merge.passthrough_namespace.to_string());
        }
        Some(Commands::Css { .. }) => {
            let output = driver::run_css(config).context("CSS rendering failed")?;
            match output {
                Output::Written(path) => eprintln!("{} {}", "Wrote".green(), path.display()),
                Output::Stdout(content) => print!("{}", content),
            }
        }
    }
    Ok(())
}

fn report(summary: &RunSummary, namespace: &str) {
    match &summary.output {
        Output::Written(path) => {
            eprintln!(
                "{} {} into '{}' ({})",
                "Merged".green(),
                path.display(),
                namespace.cyan(),
                summary.report
            );
        }
        Output::Stdout(content) => {
            print!("{}", content);
            eprintln!("{} {}", "Dry run:".yellow(), summary.report);
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging first so config loading is recorded
    let level_from_config = setup_logging().context("Failed to setup logging")?;

    // Load configuration
    let config = config::load_config(cli.config.as_ref(), &cli.overrides()).context("Failed to load configuration")?;
    if level_from_config {
        apply_log_level(&config);
    }

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
