//! One [`ResourcePolicy`] per resource type.
//!
//! Locations are keyed by the raw search string; forecasts, reviews and
//! movies by the owning [`LocationRef`]. Dependent batches are stored under a
//! fill claim on `(location id, resource)`; a location is a batch of one, so
//! its unique search query is claim enough.

use std::sync::Arc;

use async_trait::async_trait;
use city_explorer_core::normalize::{
    decode_entry, normalize_business, normalize_forecast, normalize_location, normalize_movie,
};
use city_explorer_core::raw::RawEntry;
use city_explorer_core::{
    BusinessReview, DailyForecast, Location, LocationRef, MovieSuggestion, NormalizeError,
    ResourceType,
};
use city_explorer_providers::{
    BusinessProvider, ForecastProvider, GeocodeProvider, MovieProvider, ProviderError,
};
use city_explorer_storage::traits::{
    FillClaims, ForecastStore, LocationStore, MovieStore, ReviewStore,
};
use city_explorer_storage::{SaveOutcome, Saved, StorageError};

use crate::cache_aside::ResourcePolicy;

pub struct LocationPolicy<S: ?Sized> {
    store: Arc<S>,
    provider: Arc<dyn GeocodeProvider>,
}

impl<S: ?Sized> LocationPolicy<S> {
    #[must_use]
    pub fn new(store: Arc<S>, provider: Arc<dyn GeocodeProvider>) -> Self {
        Self { store, provider }
    }
}

#[async_trait]
impl<S: LocationStore + ?Sized> ResourcePolicy for LocationPolicy<S> {
    type Key = str;
    type Raw = RawEntry;
    type Record = Location;

    const RESOURCE: ResourceType = ResourceType::Location;

    async fn lookup(&self, key: &str) -> Result<Vec<Location>, StorageError> {
        Ok(self.store.find_location(key).await?.into_iter().collect())
    }

    async fn fetch(&self, key: &str) -> Result<Vec<RawEntry>, ProviderError> {
        Ok(self.provider.geocode(key).await?.into_iter().collect())
    }

    fn normalize(&self, key: &str, raw: &RawEntry) -> Result<Location, NormalizeError> {
        normalize_location(key, &decode_entry(raw, "results[]")?)
    }

    async fn persist(
        &self,
        _key: &str,
        _position: usize,
        record: &Location,
    ) -> Result<Saved<Location>, StorageError> {
        self.store.save_location(record).await
    }
}

pub struct ForecastPolicy<S: ?Sized> {
    store: Arc<S>,
    provider: Arc<dyn ForecastProvider>,
}

impl<S: ?Sized> ForecastPolicy<S> {
    #[must_use]
    pub fn new(store: Arc<S>, provider: Arc<dyn ForecastProvider>) -> Self {
        Self { store, provider }
    }
}

#[async_trait]
impl<S: ForecastStore + FillClaims + ?Sized> ResourcePolicy for ForecastPolicy<S> {
    type Key = LocationRef;
    type Raw = RawEntry;
    type Record = DailyForecast;

    const RESOURCE: ResourceType = ResourceType::DailyForecast;

    async fn lookup(&self, key: &LocationRef) -> Result<Vec<DailyForecast>, StorageError> {
        self.store.find_forecasts(key.id).await
    }

    async fn fetch(&self, key: &LocationRef) -> Result<Vec<RawEntry>, ProviderError> {
        self.provider.daily_forecast(key.latitude, key.longitude).await
    }

    fn normalize(
        &self,
        _key: &LocationRef,
        raw: &RawEntry,
    ) -> Result<DailyForecast, NormalizeError> {
        normalize_forecast(&decode_entry(raw, "daily.data[]")?)
    }

    async fn persist(
        &self,
        key: &LocationRef,
        position: usize,
        record: &DailyForecast,
    ) -> Result<Saved<DailyForecast>, StorageError> {
        let outcome = self.store.save_forecast(key.id, position, record).await?;
        Ok(Saved { record: record.clone(), outcome })
    }

    async fn claim(&self, key: &LocationRef) -> Result<SaveOutcome, StorageError> {
        self.store.claim_fill(key.id, Self::RESOURCE).await
    }

    async fn release(&self, key: &LocationRef) -> Result<(), StorageError> {
        self.store.release_fill(key.id, Self::RESOURCE).await
    }
}

pub struct ReviewPolicy<S: ?Sized> {
    store: Arc<S>,
    provider: Arc<dyn BusinessProvider>,
}

impl<S: ?Sized> ReviewPolicy<S> {
    #[must_use]
    pub fn new(store: Arc<S>, provider: Arc<dyn BusinessProvider>) -> Self {
        Self { store, provider }
    }
}

#[async_trait]
impl<S: ReviewStore + FillClaims + ?Sized> ResourcePolicy for ReviewPolicy<S> {
    type Key = LocationRef;
    type Raw = RawEntry;
    type Record = BusinessReview;

    const RESOURCE: ResourceType = ResourceType::BusinessReview;

    async fn lookup(&self, key: &LocationRef) -> Result<Vec<BusinessReview>, StorageError> {
        self.store.find_reviews(key.id).await
    }

    async fn fetch(&self, key: &LocationRef) -> Result<Vec<RawEntry>, ProviderError> {
        self.provider.search_businesses(key.latitude, key.longitude).await
    }

    fn normalize(
        &self,
        _key: &LocationRef,
        raw: &RawEntry,
    ) -> Result<BusinessReview, NormalizeError> {
        normalize_business(&decode_entry(raw, "businesses[]")?)
    }

    async fn persist(
        &self,
        key: &LocationRef,
        position: usize,
        record: &BusinessReview,
    ) -> Result<Saved<BusinessReview>, StorageError> {
        let outcome = self.store.save_review(key.id, position, record).await?;
        Ok(Saved { record: record.clone(), outcome })
    }

    async fn claim(&self, key: &LocationRef) -> Result<SaveOutcome, StorageError> {
        self.store.claim_fill(key.id, Self::RESOURCE).await
    }

    async fn release(&self, key: &LocationRef) -> Result<(), StorageError> {
        self.store.release_fill(key.id, Self::RESOURCE).await
    }
}

pub struct MoviePolicy<S: ?Sized> {
    store: Arc<S>,
    provider: Arc<dyn MovieProvider>,
}

impl<S: ?Sized> MoviePolicy<S> {
    #[must_use]
    pub fn new(store: Arc<S>, provider: Arc<dyn MovieProvider>) -> Self {
        Self { store, provider }
    }
}

#[async_trait]
impl<S: MovieStore + FillClaims + ?Sized> ResourcePolicy for MoviePolicy<S> {
    type Key = LocationRef;
    type Raw = RawEntry;
    type Record = MovieSuggestion;

    const RESOURCE: ResourceType = ResourceType::MovieSuggestion;

    async fn lookup(&self, key: &LocationRef) -> Result<Vec<MovieSuggestion>, StorageError> {
        self.store.find_movies(key.id).await
    }

    /// Movies are searched by the location's short name, not its coordinates.
    async fn fetch(&self, key: &LocationRef) -> Result<Vec<RawEntry>, ProviderError> {
        self.provider.search_movies(&key.short_name).await
    }

    fn normalize(
        &self,
        _key: &LocationRef,
        raw: &RawEntry,
    ) -> Result<MovieSuggestion, NormalizeError> {
        normalize_movie(&decode_entry(raw, "results[]")?)
    }

    async fn persist(
        &self,
        key: &LocationRef,
        position: usize,
        record: &MovieSuggestion,
    ) -> Result<Saved<MovieSuggestion>, StorageError> {
        let outcome = self.store.save_movie(key.id, position, record).await?;
        Ok(Saved { record: record.clone(), outcome })
    }

    async fn claim(&self, key: &LocationRef) -> Result<SaveOutcome, StorageError> {
        self.store.claim_fill(key.id, Self::RESOURCE).await
    }

    async fn release(&self, key: &LocationRef) -> Result<(), StorageError> {
        self.store.release_fill(key.id, Self::RESOURCE).await
    }
}
