//! Collection point repository
//!
//! The two paths the whole service exists for:
//! - create: point row + association rows in one transaction
//! - search: filtered join over the association table, distinct by point

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{ItemIds, NewPoint};

use super::DbError;

/// Point record from database
#[derive(Debug, Clone, FromRow)]
pub struct Point {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub city: String,
    pub uf: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

/// Point repository
pub struct PointRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PointRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a point with its item associations (atomic).
    ///
    /// Inserts the point row, verifies every requested item exists, then
    /// inserts one association row per item. Any failure rolls the whole
    /// transaction back - a point never persists with partial associations.
    ///
    /// `image` is the stored upload filename.
    pub async fn create(
        &self,
        point: &NewPoint,
        image: &str,
        items: &ItemIds,
    ) -> Result<Point, DbError> {
        let ids = items.as_vec();
        let mut tx = self.pool.begin().await?;

        let created: Point = sqlx::query_as(
            r#"
            INSERT INTO points (name, email, whatsapp, city, uf, latitude, longitude, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, whatsapp, city, uf, latitude, longitude, image, created_at
            "#,
        )
        .bind(&point.name)
        .bind(point.email.as_str())
        .bind(&point.whatsapp)
        .bind(&point.city)
        .bind(point.uf.as_str())
        .bind(point.latitude)
        .bind(point.longitude)
        .bind(image)
        .fetch_one(&mut *tx)
        .await?;

        // All requested items must exist; a miss aborts the transaction
        // and the point row above is rolled back with it.
        let found: Vec<i64> = sqlx::query_scalar("SELECT id FROM items WHERE id = ANY($1)")
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await?;

        if found.len() != ids.len() {
            let missing = ids
                .iter()
                .find(|id| !found.contains(id))
                .copied()
                .unwrap_or_default();
            return Err(DbError::NotFound {
                resource: "Item",
                id: missing.to_string(),
            });
        }

        for item_id in &ids {
            sqlx::query(
                r#"
                INSERT INTO point_items (point_id, item_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(created.id)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Search points in a city/uf accepting at least one of the given items.
    ///
    /// Inclusive OR: a point qualifies if it matches any requested item.
    /// The join fans out one row per matching association; DISTINCT
    /// collapses back to point identity.
    pub async fn search(
        &self,
        city: &str,
        uf: &str,
        items: &ItemIds,
    ) -> Result<Vec<Point>, DbError> {
        let points: Vec<Point> = sqlx::query_as(
            r#"
            SELECT DISTINCT
                p.id, p.name, p.email, p.whatsapp, p.city, p.uf,
                p.latitude, p.longitude, p.image, p.created_at
            FROM points p
            INNER JOIN point_items pi ON pi.point_id = p.id
            WHERE p.city = $1
              AND p.uf = $2
              AND pi.item_id = ANY($3)
            ORDER BY p.id
            "#,
        )
        .bind(city)
        .bind(uf)
        .bind(items.as_vec())
        .fetch_all(self.pool)
        .await?;

        Ok(points)
    }

    /// Get a single point with the titles of its associated items.
    pub async fn get_with_items(&self, id: i64) -> Result<(Point, Vec<String>), DbError> {
        let point: Point = sqlx::query_as(
            r#"
            SELECT id, name, email, whatsapp, city, uf,
                   latitude, longitude, image, created_at
            FROM points
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "Point",
            id: id.to_string(),
        })?;

        let titles: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT i.title
            FROM items i
            INNER JOIN point_items pi ON pi.item_id = i.id
            WHERE pi.point_id = $1
            ORDER BY i.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok((point, titles))
    }
}
