//! Quiz-Harvest main entry point
//!
//! This is the command-line interface for the Quiz-Harvest question-bank
//! archiver.

use clap::Parser;
use dialoguer::Input;
use quiz_harvest::config::load_config_with_hash;
use quiz_harvest::sweep::{sweep, PartTable};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Quiz-Harvest: a paced quiz-bank archiver
///
/// Quiz-Harvest sweeps a remote question bank by index, writing a
/// human-readable transcript of every question alongside an archive of the
/// raw API responses.
#[derive(Parser, Debug)]
#[command(name = "quiz-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A paced quiz-bank archiver", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// First main index to fetch (prompted interactively if omitted)
    #[arg(long)]
    start: Option<u32>,

    /// Last main index to fetch, inclusive (prompted interactively if omitted)
    #[arg(long)]
    end: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be fetched without any requests
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let (start, end) = resolve_range(cli.start, cli.end)?;

    if cli.dry_run {
        handle_dry_run(&config, &config_hash, start, end);
        return Ok(());
    }

    tracing::info!("Sweeping indices {} through {}", start, end);
    let report = sweep(config, start, end).await?;

    println!(
        "All questions processed: {} saved, {} failed out of {} attempted.",
        report.items_saved, report.items_failed, report.items_attempted
    );
    for path in &report.raw_files {
        println!("Raw JSON data saved to: {}", path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quiz_harvest=info,warn"),
            1 => EnvFilter::new("quiz_harvest=debug,info"),
            2 => EnvFilter::new("quiz_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves the sweep range from flags, prompting for anything missing
fn resolve_range(
    start: Option<u32>,
    end: Option<u32>,
) -> Result<(u32, u32), Box<dyn std::error::Error>> {
    let start = match start {
        Some(value) => value,
        None => Input::new()
            .with_prompt("Enter starting question index")
            .interact_text()?,
    };

    let end = match end {
        Some(value) => value,
        None => Input::new()
            .with_prompt("Enter ending question index (for a single question, enter the same as start)")
            .interact_text()?,
    };

    if end < start {
        return Err(format!(
            "ending index {} is smaller than starting index {}",
            end, start
        )
        .into());
    }

    Ok((start, end))
}

/// Handles the --dry-run mode: validates config and shows the planned sweep
fn handle_dry_run(config: &quiz_harvest::Config, config_hash: &str, start: u32, end: u32) {
    println!("=== Quiz-Harvest Dry Run ===\n");

    println!("API:");
    println!("  Endpoint: {}", config.api.base_url);
    println!("  Library: {}", config.api.library_id);
    println!("  Mode: {}", config.api.mode);
    println!("  Timeout: {}s", config.api.timeout_secs);

    println!("\nPacing:");
    println!(
        "  Delay range: {}ms - {}ms",
        config.pacing.min_delay_ms, config.pacing.max_delay_ms
    );

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Grouping: {:?}", config.output.grouping);

    println!("\nMulti-part questions ({}):", config.multi_part.len());
    for entry in &config.multi_part {
        println!("  - {} ({} parts)", entry.main_index, entry.children);
    }

    let parts = PartTable::from_entries(&config.multi_part);
    let fetches: u64 = (start..=end)
        .map(|index| u64::from(parts.child_count(index).unwrap_or(1)))
        .sum();

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    println!(
        "✓ Would sweep indices {} through {} ({} fetches)",
        start, end, fetches
    );
}
