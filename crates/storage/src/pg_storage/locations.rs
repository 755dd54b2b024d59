//! LocationStore implementation for PgStorage.

use super::*;

use async_trait::async_trait;

use crate::traits::LocationStore;
use crate::types::{SaveOutcome, Saved};

#[async_trait]
impl LocationStore for PgStorage {
    async fn find_location(&self, search_query: &str) -> Result<Option<Location>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE search_query = $1"
        ))
        .bind(search_query)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_location(&r)).transpose()
    }

    async fn save_location(&self, location: &Location) -> Result<Saved<Location>, StorageError> {
        let inserted = sqlx::query(&format!(
            "INSERT INTO locations (search_query, formatted_query, latitude, longitude, short_name)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (search_query) DO NOTHING
             RETURNING {LOCATION_COLUMNS}"
        ))
        .bind(&location.search_query)
        .bind(&location.formatted_query)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(&location.short_name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = inserted {
            return Ok(Saved { record: row_to_location(&row)?, outcome: SaveOutcome::Inserted });
        }

        // Lost the insert race: hand back the row that won it.
        let existing = self.find_location(&location.search_query).await?.ok_or_else(|| {
            StorageError::NotFound { entity: "location", id: location.search_query.clone() }
        })?;
        Ok(Saved { record: existing, outcome: SaveOutcome::AlreadyCached })
    }
}
