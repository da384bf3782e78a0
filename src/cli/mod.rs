use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod init;
pub mod snapshot;
pub mod status;
pub mod verify;
pub mod version;

use config::LoggingConfig;

#[derive(Parser)]
#[command(name = "flightsure")]
#[command(author = "Flightsure Project")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operator CLI for the Flightsure airline registry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config and a fresh registry snapshot seeded with the owner
    Init {
        /// Path to config file (default: ~/.local/share/flightsure/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Owner identity (64 hex chars or a label)
        #[arg(long, default_value = "flightsure-owner")]
        owner: String,

        /// Overwrite an existing config and snapshot
        #[arg(long)]
        force: bool,
    },

    /// Show registry counters from the snapshot
    Status {
        /// Path to config file (default: ~/.local/share/flightsure/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the config and the snapshot's invariants
    Verify {
        /// Path to config file (default: ~/.local/share/flightsure/config.toml)
        #[arg(long)]
        config: Option<String>,
    },

    /// Display version information
    Version,
}

pub fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Init {
            config,
            owner,
            force,
        } => init::execute(config, owner, force),
        Commands::Status { config, json } => status::execute(config, json),
        Commands::Verify { config } => verify::execute(config),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let installed = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("Failed to open log file '{}': {}", path.display(), e))?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
        }
    };

    // A subscriber installed earlier in the process stays in place.
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(())
}
