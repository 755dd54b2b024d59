//! PostgreSQL schema bootstrap for city-explorer storage.
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so it runs on each connect.

use anyhow::Result;
use sqlx::PgPool;

/// Create the four record tables, the fill claims and their indexes.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id BIGSERIAL PRIMARY KEY,
            search_query TEXT NOT NULL UNIQUE,
            formatted_query TEXT NOT NULL,
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            short_name TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weathers (
            id BIGSERIAL PRIMARY KEY,
            location_id BIGINT NOT NULL REFERENCES locations (id),
            position INTEGER NOT NULL,
            time TEXT NOT NULL,
            forecast TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (location_id, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS yelps (
            id BIGSERIAL PRIMARY KEY,
            location_id BIGINT NOT NULL REFERENCES locations (id),
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            image_url TEXT NOT NULL,
            price TEXT,
            rating DOUBLE PRECISION NOT NULL,
            url TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (location_id, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS movies (
            id BIGSERIAL PRIMARY KEY,
            location_id BIGINT NOT NULL REFERENCES locations (id),
            position INTEGER NOT NULL,
            title TEXT NOT NULL,
            overview TEXT NOT NULL,
            average_votes DOUBLE PRECISION NOT NULL,
            total_votes BIGINT NOT NULL,
            image_url TEXT,
            popularity DOUBLE PRECISION NOT NULL,
            released_on DATE NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (location_id, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fills (
            location_id BIGINT NOT NULL REFERENCES locations (id),
            resource TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            PRIMARY KEY (location_id, resource)
        )
        "#,
    )
    .execute(pool)
    .await?;

    for table in ["locations", "weathers", "yelps", "movies"] {
        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_created ON {table} (created_at DESC)"
        ))
        .execute(pool)
        .await?;
    }

    tracing::debug!("PostgreSQL schema ready");
    Ok(())
}
