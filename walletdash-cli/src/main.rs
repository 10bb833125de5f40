//! walletdash CLI - admin dashboard backend for a wallet store
//!
//! Subcommands:
//! - `serve`: run the HTTP API (items, tables, innkeeper proxy, notices)
//! - `summary`: print item counts per kind and per category
//! - `tables`: print the schema and a few sample rows of the first tables

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "walletdash",
    author,
    version,
    about = "Admin dashboard backend for a wallet store and its innkeeper"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Print item counts per kind and per category
    Summary(commands::summary::SummaryArgs),
    /// Describe the first tables of the wallet database
    Tables(commands::tables::TablesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv()?;

    let cli = Cli::parse();
    tracing_setup::init_tracing(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Summary(args) => commands::run_summary(args).await?,
        Commands::Tables(args) => commands::run_tables(args).await?,
    }
    Ok(())
}
