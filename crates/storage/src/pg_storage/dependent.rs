//! ForecastStore, ReviewStore, MovieStore and FillClaims implementations for PgStorage.

use super::*;

use async_trait::async_trait;
use city_explorer_core::{LocationId, ResourceType};
use sqlx::postgres::PgQueryResult;

use crate::traits::{FillClaims, ForecastStore, MovieStore, ReviewStore};
use crate::types::SaveOutcome;

fn outcome(result: &PgQueryResult) -> SaveOutcome {
    if result.rows_affected() > 0 { SaveOutcome::Inserted } else { SaveOutcome::AlreadyCached }
}

impl PgStorage {
    async fn find_rows(
        &self,
        table: &str,
        columns: &str,
        location_id: LocationId,
    ) -> Result<Vec<PgRow>, StorageError> {
        Ok(sqlx::query(&format!(
            "SELECT {columns} FROM {table} WHERE location_id = $1 ORDER BY position"
        ))
        .bind(location_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[async_trait]
impl ForecastStore for PgStorage {
    async fn find_forecasts(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<DailyForecast>, StorageError> {
        self.find_rows("weathers", FORECAST_COLUMNS, location_id)
            .await?
            .iter()
            .map(row_to_forecast)
            .collect()
    }

    async fn save_forecast(
        &self,
        location_id: LocationId,
        position: usize,
        forecast: &DailyForecast,
    ) -> Result<SaveOutcome, StorageError> {
        let result = sqlx::query(
            "INSERT INTO weathers (location_id, position, time, forecast)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (location_id, position) DO NOTHING",
        )
        .bind(location_id)
        .bind(position_to_i32(position)?)
        .bind(&forecast.time)
        .bind(&forecast.forecast)
        .execute(&self.pool)
        .await?;
        Ok(outcome(&result))
    }
}

#[async_trait]
impl ReviewStore for PgStorage {
    async fn find_reviews(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<BusinessReview>, StorageError> {
        self.find_rows("yelps", REVIEW_COLUMNS, location_id).await?.iter().map(row_to_review).collect()
    }

    async fn save_review(
        &self,
        location_id: LocationId,
        position: usize,
        review: &BusinessReview,
    ) -> Result<SaveOutcome, StorageError> {
        let result = sqlx::query(
            "INSERT INTO yelps (location_id, position, name, image_url, price, rating, url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT (location_id, position) DO NOTHING",
        )
        .bind(location_id)
        .bind(position_to_i32(position)?)
        .bind(&review.name)
        .bind(&review.image_url)
        .bind(&review.price)
        .bind(review.rating)
        .bind(&review.url)
        .execute(&self.pool)
        .await?;
        Ok(outcome(&result))
    }
}

#[async_trait]
impl MovieStore for PgStorage {
    async fn find_movies(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<MovieSuggestion>, StorageError> {
        self.find_rows("movies", MOVIE_COLUMNS, location_id).await?.iter().map(row_to_movie).collect()
    }

    async fn save_movie(
        &self,
        location_id: LocationId,
        position: usize,
        movie: &MovieSuggestion,
    ) -> Result<SaveOutcome, StorageError> {
        let result = sqlx::query(
            "INSERT INTO movies (location_id, position, title, overview, average_votes,
                                 total_votes, image_url, popularity, released_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (location_id, position) DO NOTHING",
        )
        .bind(location_id)
        .bind(position_to_i32(position)?)
        .bind(&movie.title)
        .bind(&movie.overview)
        .bind(movie.average_votes)
        .bind(movie.total_votes)
        .bind(&movie.image_url)
        .bind(movie.popularity)
        .bind(movie.released_on)
        .execute(&self.pool)
        .await?;
        Ok(outcome(&result))
    }
}

#[async_trait]
impl FillClaims for PgStorage {
    async fn claim_fill(
        &self,
        location_id: LocationId,
        resource: ResourceType,
    ) -> Result<SaveOutcome, StorageError> {
        let result = sqlx::query(
            "INSERT INTO fills (location_id, resource) VALUES ($1, $2)
             ON CONFLICT (location_id, resource) DO NOTHING",
        )
        .bind(location_id)
        .bind(resource.as_str())
        .execute(&self.pool)
        .await?;
        Ok(outcome(&result))
    }

    async fn release_fill(
        &self,
        location_id: LocationId,
        resource: ResourceType,
    ) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM fills WHERE location_id = $1 AND resource = $2")
            .bind(location_id)
            .bind(resource.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
