use std::sync::Arc;

use city_explorer_core::{
    BusinessReview, DailyForecast, Location, LocationRef, MovieSuggestion, ResourceType,
};
use city_explorer_providers::{
    BusinessProvider, ForecastProvider, GeocodeProvider, MovieProvider, ProviderConfig,
    ProviderError,
};
use city_explorer_storage::StorageBackend;
use city_explorer_storage::traits::Store;
use serde::Serialize;

use crate::ServiceError;
use crate::cache_aside::{CacheAside, Resolution, Source};
use crate::policies::{ForecastPolicy, LocationPolicy, MoviePolicy, ReviewPolicy};

/// One upstream client per resource type.
#[derive(Clone)]
pub struct Providers {
    pub geocode: Arc<dyn GeocodeProvider>,
    pub forecast: Arc<dyn ForecastProvider>,
    pub business: Arc<dyn BusinessProvider>,
    pub movies: Arc<dyn MovieProvider>,
}

impl Providers {
    /// Build the reqwest clients. Fails on the first missing credential.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            geocode: Arc::new(config.geocode_client()?),
            forecast: Arc::new(config.forecast_client()?),
            business: Arc::new(config.business_client()?),
            movies: Arc::new(config.movie_client()?),
        })
    }
}

/// A lookup key tagged with its resource type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceQuery {
    Location(String),
    Weather(LocationRef),
    Yelp(LocationRef),
    Movies(LocationRef),
}

impl ResourceQuery {
    #[must_use]
    pub const fn resource(&self) -> ResourceType {
        match self {
            Self::Location(_) => ResourceType::Location,
            Self::Weather(_) => ResourceType::DailyForecast,
            Self::Yelp(_) => ResourceType::BusinessReview,
            Self::Movies(_) => ResourceType::MovieSuggestion,
        }
    }
}

/// Result of [`Coordinator::resolve`], one variant per resource type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resource", rename_all = "snake_case")]
pub enum Resolved {
    Location(Resolution<Location>),
    Weather(Resolution<DailyForecast>),
    Yelp(Resolution<BusinessReview>),
    Movies(Resolution<MovieSuggestion>),
}

impl Resolved {
    #[must_use]
    pub const fn source(&self) -> Source {
        match self {
            Self::Location(r) => r.source,
            Self::Weather(r) => r.source,
            Self::Yelp(r) => r.source,
            Self::Movies(r) => r.source,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Location(r) => r.records.len(),
            Self::Weather(r) => r.records.len(),
            Self::Yelp(r) => r.records.len(),
            Self::Movies(r) => r.records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records as the HTTP layer renders them: the location as a single
    /// object (`null` when there was no match), everything else as an array.
    pub fn records_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Location(r) => serde_json::to_value(r.records.first()),
            Self::Weather(r) => serde_json::to_value(&r.records),
            Self::Yelp(r) => serde_json::to_value(&r.records),
            Self::Movies(r) => serde_json::to_value(&r.records),
        }
    }
}

/// Resource-type-dispatching façade over [`CacheAside`].
pub struct Coordinator<S: ?Sized = StorageBackend> {
    location: LocationPolicy<S>,
    weather: ForecastPolicy<S>,
    yelp: ReviewPolicy<S>,
    movies: MoviePolicy<S>,
}

impl<S: Store + ?Sized> Coordinator<S> {
    #[must_use]
    pub fn new(store: Arc<S>, providers: Providers) -> Self {
        Self {
            location: LocationPolicy::new(Arc::clone(&store), providers.geocode),
            weather: ForecastPolicy::new(Arc::clone(&store), providers.forecast),
            yelp: ReviewPolicy::new(Arc::clone(&store), providers.business),
            movies: MoviePolicy::new(store, providers.movies),
        }
    }

    pub async fn resolve(&self, query: ResourceQuery) -> Result<Resolved, ServiceError> {
        Ok(match query {
            ResourceQuery::Location(q) => Resolved::Location(self.resolve_location(&q).await?),
            ResourceQuery::Weather(r) => Resolved::Weather(self.resolve_weather(&r).await?),
            ResourceQuery::Yelp(r) => Resolved::Yelp(self.resolve_yelp(&r).await?),
            ResourceQuery::Movies(r) => Resolved::Movies(self.resolve_movies(&r).await?),
        })
    }

    /// At most one record. The cache key is `search_query` exactly as given.
    pub async fn resolve_location(
        &self,
        search_query: &str,
    ) -> Result<Resolution<Location>, ServiceError> {
        if search_query.trim().is_empty() {
            return Err(ServiceError::InvalidInput("search query is empty".to_owned()));
        }
        CacheAside::resolve(&self.location, search_query).await
    }

    pub async fn resolve_weather(
        &self,
        location: &LocationRef,
    ) -> Result<Resolution<DailyForecast>, ServiceError> {
        CacheAside::resolve(&self.weather, location).await
    }

    pub async fn resolve_yelp(
        &self,
        location: &LocationRef,
    ) -> Result<Resolution<BusinessReview>, ServiceError> {
        CacheAside::resolve(&self.yelp, location).await
    }

    pub async fn resolve_movies(
        &self,
        location: &LocationRef,
    ) -> Result<Resolution<MovieSuggestion>, ServiceError> {
        CacheAside::resolve(&self.movies, location).await
    }
}
