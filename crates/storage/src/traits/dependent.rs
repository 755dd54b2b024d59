//! Stores for the resource types owned by a location.
//!
//! `position` is the entry's index in the provider response; `(location_id,
//! position)` is the unique natural key. Rows under one location are written
//! only by the holder of the matching [`FillClaims`] claim.

use async_trait::async_trait;
use city_explorer_core::{BusinessReview, DailyForecast, LocationId, MovieSuggestion, ResourceType};

use crate::error::StorageError;
use crate::types::SaveOutcome;

#[async_trait]
pub trait ForecastStore: Send + Sync {
    async fn find_forecasts(&self, location_id: LocationId)
    -> Result<Vec<DailyForecast>, StorageError>;

    async fn save_forecast(
        &self,
        location_id: LocationId,
        position: usize,
        forecast: &DailyForecast,
    ) -> Result<SaveOutcome, StorageError>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn find_reviews(&self, location_id: LocationId)
    -> Result<Vec<BusinessReview>, StorageError>;

    async fn save_review(
        &self,
        location_id: LocationId,
        position: usize,
        review: &BusinessReview,
    ) -> Result<SaveOutcome, StorageError>;
}

#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn find_movies(&self, location_id: LocationId)
    -> Result<Vec<MovieSuggestion>, StorageError>;

    async fn save_movie(
        &self,
        location_id: LocationId,
        position: usize,
        movie: &MovieSuggestion,
    ) -> Result<SaveOutcome, StorageError>;
}

/// Ownership of the one batch stored per `(location_id, resource)`.
///
/// The first miss to claim a pair is the only one that writes rows for it, so
/// concurrent misses with different provider answers never interleave.
#[async_trait]
pub trait FillClaims: Send + Sync {
    /// `Inserted` when the caller now owns the fill, `AlreadyCached` when
    /// another request already does.
    async fn claim_fill(
        &self,
        location_id: LocationId,
        resource: ResourceType,
    ) -> Result<SaveOutcome, StorageError>;

    /// Drop a claim whose batch stored nothing, so a later miss can retry.
    async fn release_fill(
        &self,
        location_id: LocationId,
        resource: ResourceType,
    ) -> Result<(), StorageError>;
}
