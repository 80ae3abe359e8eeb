//! Repository implementations for database access
//!
//! Patterns used throughout:
//! - JOINs for the search path (no N+1)
//! - Transactions for multi-step writes
//! - fetch_optional + typed NotFound instead of unwrapping rows

pub mod items;
pub mod points;

pub use items::{Item, ItemRepo};
pub use points::{Point, PointRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
