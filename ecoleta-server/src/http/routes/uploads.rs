//! Static file serving for stored point images
//!
//! Whatever the upload store writes under the uploads directory is served
//! back at `/uploads/<file>`, which is the path `asset_url` links point to.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::http::server::AppState;

pub fn router(uploads_dir: &Path) -> Router<Arc<AppState>> {
    tracing::info!(path = %uploads_dir.display(), "Serving static files from /uploads/");

    Router::new().nest_service("/uploads", ServeDir::new(uploads_dir))
}
