//! medialoc: inspect how media descriptors resolve
//!
//! Commands:
//!   resolve <file|->  - resolve a JSON request, print location, cache key, size
//!   key <file|->      - print only the cache key (fails when there is none)
//!   config show       - display current configuration

mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use medialoc_core::config::{ConfigSource, MedialocConfig};
use medialoc_resolve::{DefaultOwnerKeys, KeyDeriver};

use report::{read_request, Report};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "medialoc",
    version,
    about = "Media location resolver",
    long_about = "medialoc: normalize media descriptors into fetchable locations and cache keys"
)]
struct Cli {
    /// Path to medialoc.toml configuration file
    #[arg(long, short = 'c', env = "MEDIALOC_CONFIG", default_value = "medialoc.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "MEDIALOC_LOG")]
    log: Option<String>,

    /// Log format; overrides the config file
    #[arg(long)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a JSON request and print the full report
    Resolve {
        /// Request file, or `-` for stdin
        input: PathBuf,
    },

    /// Print the cache key for a JSON request
    Key {
        /// Request file, or `-` for stdin
        input: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, source) = MedialocConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config: {}", cli.config.display()))?;

    let level = cli.log.as_deref().unwrap_or(config.log.level.as_str());
    let format = cli.log_format.clone().unwrap_or(match config.log.format.as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Text,
    });
    init_logging(level, &format);
    report_config_source(&cli.config, source);

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "medialoc starting"
    );

    let deriver = KeyDeriver::new(DefaultOwnerKeys, config.keys.clone());

    match cli.command {
        Commands::Resolve { input } => cmd_resolve(&deriver, &input),
        Commands::Key { input } => cmd_key(&deriver, &input),
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &cli.config),
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries command output
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Logged after `init_logging`; before it there is no subscriber to receive the event.
fn report_config_source(path: &Path, source: ConfigSource) {
    if source == ConfigSource::Defaults {
        warn!(
            "config file not found: {}  (using defaults)",
            path.display()
        );
    }
}

// ── `medialoc resolve` ────────────────────────────────────────────────────────

fn cmd_resolve(deriver: &KeyDeriver<DefaultOwnerKeys>, input: &Path) -> Result<()> {
    let request = read_request(input)?;
    let report = Report::build(&request, deriver);
    let json = serde_json::to_string_pretty(&report).context("encoding report")?;
    println!("{json}");
    Ok(())
}

// ── `medialoc key` ────────────────────────────────────────────────────────────

fn cmd_key(deriver: &KeyDeriver<DefaultOwnerKeys>, input: &Path) -> Result<()> {
    let request = read_request(input)?;
    match Report::build(&request, deriver).cache_key {
        Some(key) => {
            println!("{key}");
            Ok(())
        }
        None => anyhow::bail!(
            "no cache key: {} does not resolve to a keyable location",
            input.display()
        ),
    }
}

// ── `medialoc config show` ────────────────────────────────────────────────────

fn cmd_config_show(config: &MedialocConfig, path: &Path) -> Result<()> {
    println!("# source: {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
