//! ecoleta-server: HTTP API for the Ecoleta collection point directory
//!
//! Exposes the item catalog and collection point registration/search over
//! REST, backed by Postgres. The interesting parts live in `db::repos`:
//! the atomic point + association write and the filtered distinct search.

pub mod db;
pub mod http;
pub mod models;
pub mod uploads;

pub use http::error::ApiError;
pub use http::server::{router, run_server, AppState, ServerConfig};
