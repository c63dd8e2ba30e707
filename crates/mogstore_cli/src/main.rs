//! mogstore CLI
//!
//! Command-line tools for a mogstore blob store.
//!
//! # Commands
//!
//! - `put` - Store a local file under a key
//! - `get` - Fetch a key to a file or stdout
//! - `exists` - Check whether a key is stored
//! - `rm` - Delete a key
//! - `smoke` - Run a write/read/seek self-test against the store
//!
//! The store is a directory (`--store-dir`). Domain and trackers come from
//! flags, then a JSON settings file, then `MOGILE_DOMAIN` and
//! `MOGILE_TRACKERS` in the environment.

mod commands;

use clap::{Parser, Subcommand};
use mogstore_core::Settings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// mogstore command-line storage tools.
#[derive(Parser)]
#[command(name = "mogstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory backing the blob store
    #[arg(global = true, short, long)]
    store_dir: Option<PathBuf>,

    /// Tracker endpoints, comma or slash separated
    #[arg(global = true, short, long)]
    trackers: Option<String>,

    /// Domain to operate in
    #[arg(global = true, short, long)]
    domain: Option<String>,

    /// JSON file with MOGILE_TRACKERS and MOGILE_DOMAIN
    #[arg(global = true, long)]
    settings: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a local file under a key
    Put {
        /// Key to store under
        key: String,

        /// File to upload
        file: PathBuf,
    },

    /// Fetch a key
    Get {
        /// Key to fetch
        key: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a key is stored
    Exists {
        /// Key to check
        key: String,
    },

    /// Delete a key
    Rm {
        /// Key to delete
        key: String,
    },

    /// Run a write/read/seek self-test
    Smoke {
        /// Size of each test payload in bytes
        #[arg(long, default_value = "10240")]
        size: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so `get` can stream to stdout
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = resolve_settings(&cli)?;
    let store_dir = cli.store_dir.ok_or("Store directory required (--store-dir)")?;
    let storage = commands::open_storage(&store_dir, settings)?;

    match cli.command {
        Commands::Put { key, file } => commands::put::run(&storage, &key, &file)?,
        Commands::Get { key, output } => commands::get::run(&storage, &key, output.as_deref())?,
        Commands::Exists { key } => commands::exists::run(&storage, &key)?,
        Commands::Rm { key } => commands::rm::run(&storage, &key)?,
        Commands::Smoke { size } => commands::smoke::run(&storage, size)?,
    }

    Ok(())
}

/// Merges flags over the settings file over the environment.
fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let flags = Settings {
        trackers: cli.trackers.clone(),
        domain: cli.domain.clone(),
    };
    let file = match &cli.settings {
        Some(path) => commands::read_settings(path)?,
        None => Settings::default(),
    };
    Ok(flags.or(file).or(Settings::from_env()))
}
