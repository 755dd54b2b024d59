//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by resource type.

mod dependent;
mod locations;

use std::time::Duration;

use city_explorer_core::{
    BusinessReview, DailyForecast, Location, MovieSuggestion, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    /// Connect, then bootstrap the schema.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Convert a provider position to the `INTEGER` column.
pub(crate) fn position_to_i32(position: usize) -> Result<i32, StorageError> {
    i32::try_from(position).map_err(|e| StorageError::DataCorruption {
        context: format!("position {position} exceeds i32::MAX"),
        source: Box::new(e),
    })
}

pub(crate) const LOCATION_COLUMNS: &str =
    "id, search_query, formatted_query, latitude, longitude, short_name";

pub(crate) const FORECAST_COLUMNS: &str = "time, forecast";

pub(crate) const REVIEW_COLUMNS: &str = "name, image_url, price, rating, url";

pub(crate) const MOVIE_COLUMNS: &str =
    "title, overview, average_votes, total_votes, image_url, popularity, released_on";

pub(crate) fn row_to_location(row: &PgRow) -> Result<Location, StorageError> {
    Ok(Location {
        id: Some(row.try_get("id")?),
        search_query: row.try_get("search_query")?,
        formatted_query: row.try_get("formatted_query")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        short_name: row.try_get("short_name")?,
    })
}

pub(crate) fn row_to_forecast(row: &PgRow) -> Result<DailyForecast, StorageError> {
    Ok(DailyForecast { time: row.try_get("time")?, forecast: row.try_get("forecast")? })
}

pub(crate) fn row_to_review(row: &PgRow) -> Result<BusinessReview, StorageError> {
    Ok(BusinessReview {
        name: row.try_get("name")?,
        image_url: row.try_get("image_url")?,
        price: row.try_get("price")?,
        rating: row.try_get("rating")?,
        url: row.try_get("url")?,
    })
}

pub(crate) fn row_to_movie(row: &PgRow) -> Result<MovieSuggestion, StorageError> {
    Ok(MovieSuggestion {
        title: row.try_get("title")?,
        overview: row.try_get("overview")?,
        average_votes: row.try_get("average_votes")?,
        total_votes: row.try_get("total_votes")?,
        image_url: row.try_get("image_url")?,
        popularity: row.try_get("popularity")?,
        released_on: row.try_get("released_on")?,
    })
}
