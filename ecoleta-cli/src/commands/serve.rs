//! HTTP server command
//!
//! Runs migrations and the item seed, then serves the API until shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ecoleta_server::db::{create_pool, migrations};
use ecoleta_server::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3333)
    #[arg(long, short = 'b', default_value = "127.0.0.1:3333")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Directory for uploaded point images
    #[arg(long, default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Public base URL used in image links (default: derived from --bind)
    #[arg(long)]
    pub public_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    tracing::info!("Starting ecoleta server on {}", args.bind);

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        uploads_dir: args.uploads_dir,
        public_url: args.public_url,
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
