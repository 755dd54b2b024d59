//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use city_explorer_core::{
    BusinessReview, DailyForecast, Location, LocationId, MovieSuggestion, ResourceType,
};

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::pg_storage::PgStorage;
use crate::traits::{FillClaims, ForecastStore, LocationStore, MovieStore, ReviewStore};
use crate::types::{SaveOutcome, Saved};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as $trait>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

// ── LocationStore ────────────────────────────────────────────────

#[async_trait]
impl LocationStore for StorageBackend {
    async fn find_location(&self, search_query: &str) -> Result<Option<Location>, StorageError> {
        dispatch!(self, LocationStore, find_location(search_query))
    }

    async fn save_location(&self, location: &Location) -> Result<Saved<Location>, StorageError> {
        dispatch!(self, LocationStore, save_location(location))
    }
}

// ── ForecastStore ────────────────────────────────────────────────

#[async_trait]
impl ForecastStore for StorageBackend {
    async fn find_forecasts(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<DailyForecast>, StorageError> {
        dispatch!(self, ForecastStore, find_forecasts(location_id))
    }

    async fn save_forecast(
        &self,
        location_id: LocationId,
        position: usize,
        forecast: &DailyForecast,
    ) -> Result<SaveOutcome, StorageError> {
        dispatch!(self, ForecastStore, save_forecast(location_id, position, forecast))
    }
}

// ── ReviewStore ──────────────────────────────────────────────────

#[async_trait]
impl ReviewStore for StorageBackend {
    async fn find_reviews(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<BusinessReview>, StorageError> {
        dispatch!(self, ReviewStore, find_reviews(location_id))
    }

    async fn save_review(
        &self,
        location_id: LocationId,
        position: usize,
        review: &BusinessReview,
    ) -> Result<SaveOutcome, StorageError> {
        dispatch!(self, ReviewStore, save_review(location_id, position, review))
    }
}

// ── MovieStore ───────────────────────────────────────────────────

#[async_trait]
impl MovieStore for StorageBackend {
    async fn find_movies(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<MovieSuggestion>, StorageError> {
        dispatch!(self, MovieStore, find_movies(location_id))
    }

    async fn save_movie(
        &self,
        location_id: LocationId,
        position: usize,
        movie: &MovieSuggestion,
    ) -> Result<SaveOutcome, StorageError> {
        dispatch!(self, MovieStore, save_movie(location_id, position, movie))
    }
}

// ── FillClaims ───────────────────────────────────────────────────

#[async_trait]
impl FillClaims for StorageBackend {
    async fn claim_fill(
        &self,
        location_id: LocationId,
        resource: ResourceType,
    ) -> Result<SaveOutcome, StorageError> {
        dispatch!(self, FillClaims, claim_fill(location_id, resource))
    }

    async fn release_fill(
        &self,
        location_id: LocationId,
        resource: ResourceType,
    ) -> Result<(), StorageError> {
        dispatch!(self, FillClaims, release_fill(location_id, resource))
    }
}
