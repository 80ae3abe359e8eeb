//! Database migrations for the directory tables
//!
//! Idempotent: every statement is IF NOT EXISTS / ON CONFLICT DO NOTHING,
//! so this runs unconditionally at startup.

use sqlx::PgPool;

use super::repos::DbError;

/// Seeded item catalog: title + bundled image filename.
/// The catalog is reference data; the application never writes to it
/// outside this seed.
const ITEM_SEED: &[(&str, &str)] = &[
    ("Lâmpadas", "lampadas.svg"),
    ("Pilhas e Baterias", "baterias.svg"),
    ("Papéis e Papelão", "papeis-papelao.svg"),
    ("Resíduos Eletrônicos", "eletronicos.svg"),
    ("Resíduos Orgânicos", "organicos.svg"),
    ("Óleo de Cozinha", "oleo.svg"),
];

/// Run all migrations, then seed the item catalog.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            image TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS points (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            whatsapp TEXT NOT NULL,
            city TEXT NOT NULL,
            uf TEXT NOT NULL,
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            image TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Association rows live and die with their point; item_id has no
    // cascade because the catalog is never deleted from.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS point_items (
            point_id BIGINT NOT NULL REFERENCES points(id) ON DELETE CASCADE,
            item_id BIGINT NOT NULL REFERENCES items(id),
            PRIMARY KEY (point_id, item_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;
    seed_items(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    // Search filters on city/uf, join probes on item_id
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_points_city_uf ON points(city, uf)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_point_items_item ON point_items(item_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn seed_items(pool: &PgPool) -> Result<(), DbError> {
    for (title, image) in ITEM_SEED {
        sqlx::query(
            r#"
            INSERT INTO items (title, image)
            VALUES ($1, $2)
            ON CONFLICT (title) DO NOTHING
            "#,
        )
        .bind(title)
        .bind(image)
        .execute(pool)
        .await?;
    }

    Ok(())
}
