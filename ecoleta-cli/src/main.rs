//! ecoleta CLI - collection point directory service
//!
//! Entry point for the Ecoleta API:
//! - `serve`: run migrations + seed, then serve the HTTP API
//! - `migrate`: prepare the database and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "ecoleta",
    author,
    version,
    about = "API server for the Ecoleta recycling collection point directory"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Run database migrations and seed the item catalog, then exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; missing file is not an error
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
    }
}
