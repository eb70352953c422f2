//! Confectionery CLI - Database migrations and seed data.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! confectionery-cli migrate
//!
//! # Insert the sample cake catalogue
//! confectionery-cli seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations from `crates/api/migrations/`
//! - `seed` - Insert sample cakes, skipping names that already exist

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "confectionery-cli")]
#[command(author, version, about = "Confectionery API CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample cakes into the catalogue
    Seed,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => {
            let report = commands::seed::cakes().await?;
            tracing::info!(
                inserted = report.inserted,
                skipped = report.skipped,
                "Seed complete"
            );
        }
    }
    Ok(())
}
