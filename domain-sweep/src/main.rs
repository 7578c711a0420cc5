//! Domain Sweep CLI Application
//!
//! A command-line interface for sweeping candidate domain lists with
//! concurrent DNS lookups. Domains that fail to resolve with a "no such
//! name" answer are written to a timestamped report file.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use domain_sweep_lib::{
    load_env_config, write_report, ConfigManager, DomainSweeper, FileConfig, SweepConfig,
    MAX_TIMEOUT_SECS,
};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-sweep
#[derive(Parser, Debug)]
#[command(name = "domain-sweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find candidate domains that fail DNS resolution")]
#[command(
    long_about = "Sweep a list of candidate domains with concurrent DNS lookups.\n\nNames that fail to resolve with a \"no such name\" answer are collected into a timestamped report file. This is a heuristic availability signal, not a registry check."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Input file with candidate domains (one per line)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        default_value = "domains.txt",
        help_heading = "Input"
    )]
    pub file: String,

    /// Number of worker threads (minimum 1)
    #[arg(
        short = 't',
        long = "threads",
        value_name = "N",
        default_value_t = 8,
        help_heading = "Performance"
    )]
    pub threads: usize,

    /// Per-lookup timeout in seconds (clamped to max 25)
    #[arg(
        short = 'o',
        long = "timeout",
        value_name = "SECS",
        default_value_t = 5,
        help_heading = "Performance"
    )]
    pub timeout: u64,

    /// Print a progress line every N completed lookups (0 disables)
    #[arg(
        long = "progress-every",
        value_name = "N",
        default_value_t = 10,
        help_heading = "Output"
    )]
    pub progress_every: usize,

    /// Directory the report file is written to
    #[arg(long = "out-dir", value_name = "DIR", help_heading = "Output")]
    pub out_dir: Option<String>,

    /// Print the final report as JSON to stdout
    #[arg(short = 'j', long = "json", help_heading = "Output")]
    pub json: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,

    /// Show detailed debug information
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args);

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Run the sweep
    if let Err(e) = run_sweep(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initialize tracing. RUST_LOG wins when set; otherwise the level follows
/// the --verbose/--debug flags.
fn init_logging(args: &Args) {
    let default_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    if args.threads == 0 {
        return Err("Thread count must be at least 1".to_string());
    }

    if args.timeout == 0 {
        return Err("Timeout must be at least 1 second".to_string());
    }

    Ok(())
}

/// Main sweep logic
async fn run_sweep(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Build configuration from config file, environment, and CLI args
    let config = build_config(&args)?;
    let out_dir = config.output_dir.clone();

    if args.verbose && !args.json {
        ui::print_header(&args.file, &config);
    }

    let mut sweeper = DomainSweeper::with_config(config);
    if !args.json {
        // Human runs get progress lines on stdout; JSON runs keep stdout
        // clean and leave progress to the tracing default.
        sweeper = sweeper.with_progress_observer(Arc::new(ui::ConsoleProgress));
    }

    let report = sweeper.run(&args.file).await?;

    // Persist before printing: a write failure must be loud, the results
    // exist nowhere else.
    let path = write_report(&report, &out_dir)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        eprintln!("Results saved to {}", path.display());
    } else {
        ui::print_summary(&report, &path);
    }

    Ok(())
}

/// Build SweepConfig with layered precedence.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (DS_*)
/// 3. Config file (./.domain-sweep.toml, then ~/.domain-sweep.toml)
/// 4. Built-in defaults
fn build_config(args: &Args) -> Result<SweepConfig, Box<dyn std::error::Error>> {
    let mut config = SweepConfig::default();

    // Step 1: config file discovery
    let config_manager = ConfigManager::new(args.verbose);
    match config_manager.discover_and_load() {
        Ok(file_config) => {
            config = merge_file_config(config, file_config);
        }
        Err(e) => {
            // A present-but-broken config file should not silently change
            // behavior; fail loudly.
            return Err(format!("Failed to load config file: {}", e).into());
        }
    }

    // Step 2: environment variables (DS_*)
    config = apply_env_config(config, args.verbose);

    // Step 3: CLI arguments (highest precedence)
    config = apply_cli_args(config, args);

    Ok(config)
}

/// Merge FileConfig into SweepConfig
fn merge_file_config(mut config: SweepConfig, file_config: FileConfig) -> SweepConfig {
    if let Some(defaults) = file_config.defaults {
        if let Some(threads) = defaults.threads {
            config = config.with_workers(threads);
        }
        if let Some(timeout) = defaults.timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }
        if let Some(every) = defaults.progress_every {
            config = config.with_progress_every(every);
        }
        if let Some(dir) = defaults.output_dir {
            config = config.with_output_dir(dir);
        }
    }
    config
}

/// Apply DS_* environment variables to the config.
fn apply_env_config(mut config: SweepConfig, verbose: bool) -> SweepConfig {
    let env_config = load_env_config(verbose);

    if let Some(threads) = env_config.threads {
        config = config.with_workers(threads);
    }
    if let Some(timeout) = env_config.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    if let Some(every) = env_config.progress_every {
        config = config.with_progress_every(every);
    }
    if let Some(dir) = env_config.output_dir {
        config = config.with_output_dir(dir);
    }

    config
}

/// Apply CLI arguments to the config (highest precedence).
///
/// Clap cannot report whether a value was explicitly passed or defaulted,
/// so flags only override when they differ from the clap default. Passing
/// the default explicitly therefore defers to env/config values, which is
/// acceptable behavior.
fn apply_cli_args(mut config: SweepConfig, args: &Args) -> SweepConfig {
    if args.threads != 8 {
        // 8 is the clap default
        config = config.with_workers(args.threads);
    }
    if args.timeout != 5 {
        // 5 is the clap default
        if args.timeout > MAX_TIMEOUT_SECS {
            tracing::warn!(
                "timeout {}s exceeds the maximum, clamping to {}s",
                args.timeout,
                MAX_TIMEOUT_SECS
            );
        }
        config = config.with_timeout(Duration::from_secs(args.timeout));
    }
    if args.progress_every != 10 {
        // 10 is the clap default
        config = config.with_progress_every(args.progress_every);
    }
    if let Some(dir) = &args.out_dir {
        config = config.with_output_dir(dir.clone());
    }
    config
}
