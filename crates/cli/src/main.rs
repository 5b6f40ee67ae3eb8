//! Salesboard CLI - Database migrations and offline CSV tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! sb-cli migrate
//!
//! # Clean a CSV file and append it to the database
//! sb-cli import sales.csv
//!
//! # Print a per-category summary of a CSV file (no database needed)
//! sb-cli summarize sales.csv
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sb-cli")]
#[command(author, version, about = "Salesboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Clean a CSV file and append its rows to the database
    Import {
        /// Path to the CSV file
        file: String,
    },
    /// Print the per-category summary of a CSV file
    Summarize {
        /// Path to the CSV file
        file: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Import { file } => {
            let rows = commands::import::run(&file).await?;
            #[allow(clippy::print_stdout)]
            {
                println!("Imported {rows} rows from {file}");
            }
        }
        Commands::Summarize { file } => {
            let table = commands::summarize::run(&file)?;
            #[allow(clippy::print_stdout)]
            {
                print!("{table}");
            }
        }
    }
    Ok(())
}
