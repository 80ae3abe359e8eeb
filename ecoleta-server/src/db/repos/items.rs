//! Item catalog repository
//!
//! The catalog is seeded reference data; the only operation is a full read.

use sqlx::{FromRow, PgPool};

use super::DbError;

/// Item record from database
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub image: String,
}

/// Item repository
pub struct ItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog, ordered by id.
    pub async fn list(&self) -> Result<Vec<Item>, DbError> {
        let items: Vec<Item> = sqlx::query_as(
            r#"
            SELECT id, title, image
            FROM items
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}
