//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Static serving of uploaded images
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::uploads::{UploadError, UploadStore};

use super::routes;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3333)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    /// Only use for development or documented use cases.
    pub cors_permissive: bool,

    /// Directory for uploaded point images
    pub uploads_dir: PathBuf,

    /// Public base URL used when serializing image links
    /// (default: derived from bind_addr)
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3333)),
            cors_permissive: false,
            uploads_dir: PathBuf::from("uploads"),
            public_url: None,
        }
    }
}

impl ServerConfig {
    fn resolved_public_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.bind_addr))
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub uploads: UploadStore,
    /// Base URL prepended to `/uploads/<file>` links
    pub public_url: String,
}

impl AppState {
    /// Fully-qualified URL for a stored image filename.
    pub fn asset_url(&self, file: &str) -> String {
        format!("{}/uploads/{}", self.public_url.trim_end_matches('/'), file)
    }
}

/// Build the application router.
///
/// Split out from [`run_server`] so tests can drive it with
/// `tower::ServiceExt::oneshot` without binding a socket.
pub fn router(state: AppState, cors_permissive: bool) -> Router {
    let cors = if cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        // Localhost only
        CorsLayer::new()
            .allow_origin([
                "http://localhost:3000".parse().unwrap(),
                "http://localhost:3333".parse().unwrap(),
                "http://127.0.0.1:3000".parse().unwrap(),
                "http://127.0.0.1:3333".parse().unwrap(),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let uploads_dir = state.uploads.root().to_path_buf();

    Router::new()
        .merge(routes::health::router())
        .merge(routes::items::router())
        .merge(routes::points::router())
        .merge(routes::uploads::router(&uploads_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let config = ServerConfig::default();
/// run_server(pool, config).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let uploads = UploadStore::new(&config.uploads_dir)?;
    tracing::info!(dir = %config.uploads_dir.display(), "Upload store ready");

    let state = AppState {
        pool,
        uploads,
        public_url: config.resolved_public_url(),
    };
    let app = router(state, config.cors_permissive);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload store error: {0}")]
    Uploads(#[from] UploadError),
}
