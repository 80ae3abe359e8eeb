//! Standalone migration command
//!
//! Creates the schema and seeds the item catalog, then exits. `serve` does
//! the same at startup; this exists for deploy pipelines that migrate first.

use anyhow::{Context, Result};
use clap::Parser;

use ecoleta_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Run migrations and the item seed, then exit.
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Database ready");
    Ok(())
}
