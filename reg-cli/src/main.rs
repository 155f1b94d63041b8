//! # regsync
//!
//! CLI for the offline-first registration queue.
//!
//! ## Commands
//!
//! - `enqueue`: Queue a registration locally from a JSON file
//! - `status`: Show queue status
//! - `sync`: Push all unsynced registrations to the server now
//! - `prune`: Delete registrations already confirmed by the server
//!
//! ## Example
//!
//! ```bash
//! # Queue a registration (works offline)
//! regsync enqueue student.json
//!
//! # See what is waiting
//! regsync status
//!
//! # Push the backlog to the server
//! regsync sync
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regsync_client::Config;
use std::path::PathBuf;

mod commands;

use commands::{enqueue, prune, status, sync};

/// CLI for the offline-first registration queue.
#[derive(Parser, Debug)]
#[command(name = "regsync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "regsync.toml")]
    config: PathBuf,

    /// Override the queue database path from the config file
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Queue a registration locally from a JSON file
    Enqueue {
        /// Path to a JSON registration file (use "-" for stdin)
        file: PathBuf,
    },

    /// Show queue status
    Status,

    /// Push all unsynced registrations to the server now
    Sync,

    /// Delete registrations already confirmed by the server
    Prune,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Missing config file is fine: everything has a default
    let mut config = if cli.config.exists() {
        Config::from_file(&cli.config).context("Failed to load configuration")?
    } else {
        Config::default()
    };
    if let Some(database) = cli.database {
        config.storage.database = database;
    }

    match cli.command {
        Commands::Enqueue { file } => {
            enqueue::run(&config, &file).await?;
        }
        Commands::Status => {
            status::run(&config).await?;
        }
        Commands::Sync => {
            sync::run(&config).await?;
        }
        Commands::Prune => {
            prune::run(&config).await?;
        }
    }

    Ok(())
}
