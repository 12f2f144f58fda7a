//! Cuppa CLI - Schema setup and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the database schema if absent
//! cuppa-cli migrate
//!
//! # Insert a handful of sample cafés
//! cuppa-cli seed
//! ```
//!
//! The database location comes from `CUPPA_DATABASE_URL` (same default as
//! the server).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cuppa-cli")]
#[command(author, version, about = "Cuppa CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema if absent
    Migrate,
    /// Insert sample café listings
    Seed,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cuppa_cli=info,cuppa_web=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
