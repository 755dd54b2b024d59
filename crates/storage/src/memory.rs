//! In-process store with the same key rules as the PostgreSQL schema.
//!
//! Used by tests and by `serve --memory`; contents live as long as the value.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use city_explorer_core::{
    BusinessReview, DailyForecast, Location, LocationId, MovieSuggestion, ResourceType,
};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::{FillClaims, ForecastStore, LocationStore, MovieStore, ReviewStore};
use crate::types::{SaveOutcome, Saved};

/// Records owned by one location, ordered by provider position.
type Owned<T> = HashMap<LocationId, BTreeMap<usize, T>>;

#[derive(Debug, Default)]
struct Tables {
    last_location_id: LocationId,
    locations: HashMap<String, Location>,
    forecasts: Owned<DailyForecast>,
    reviews: Owned<BusinessReview>,
    movies: Owned<MovieSuggestion>,
    fills: HashSet<(LocationId, ResourceType)>,
}

impl Tables {
    fn has_location(&self, id: LocationId) -> bool {
        self.locations.values().any(|l| l.id == Some(id))
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached locations.
    pub async fn location_count(&self) -> usize {
        self.tables.read().await.locations.len()
    }
}

fn find_owned<T: Clone>(table: &Owned<T>, location_id: LocationId) -> Vec<T> {
    table.get(&location_id).map(|rows| rows.values().cloned().collect()).unwrap_or_default()
}

fn insert_owned<T: Clone>(
    tables: &mut Tables,
    select: impl FnOnce(&mut Tables) -> &mut Owned<T>,
    location_id: LocationId,
    position: usize,
    record: &T,
) -> Result<SaveOutcome, StorageError> {
    if !tables.has_location(location_id) {
        return Err(StorageError::MissingLocation(format!("location {location_id}")));
    }
    let rows = select(tables).entry(location_id).or_default();
    if rows.contains_key(&position) {
        return Ok(SaveOutcome::AlreadyCached);
    }
    rows.insert(position, record.clone());
    Ok(SaveOutcome::Inserted)
}

#[async_trait]
impl LocationStore for MemoryStorage {
    async fn find_location(&self, search_query: &str) -> Result<Option<Location>, StorageError> {
        Ok(self.tables.read().await.locations.get(search_query).cloned())
    }

    async fn save_location(&self, location: &Location) -> Result<Saved<Location>, StorageError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.locations.get(&location.search_query) {
            return Ok(Saved { record: existing.clone(), outcome: SaveOutcome::AlreadyCached });
        }
        tables.last_location_id += 1;
        let stored = location.clone().with_id(tables.last_location_id);
        tables.locations.insert(stored.search_query.clone(), stored.clone());
        Ok(Saved { record: stored, outcome: SaveOutcome::Inserted })
    }
}

#[async_trait]
impl ForecastStore for MemoryStorage {
    async fn find_forecasts(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<DailyForecast>, StorageError> {
        Ok(find_owned(&self.tables.read().await.forecasts, location_id))
    }

    async fn save_forecast(
        &self,
        location_id: LocationId,
        position: usize,
        forecast: &DailyForecast,
    ) -> Result<SaveOutcome, StorageError> {
        let mut tables = self.tables.write().await;
        insert_owned(&mut tables, |t| &mut t.forecasts, location_id, position, forecast)
    }
}

#[async_trait]
impl ReviewStore for MemoryStorage {
    async fn find_reviews(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<BusinessReview>, StorageError> {
        Ok(find_owned(&self.tables.read().await.reviews, location_id))
    }

    async fn save_review(
        &self,
        location_id: LocationId,
        position: usize,
        review: &BusinessReview,
    ) -> Result<SaveOutcome, StorageError> {
        let mut tables = self.tables.write().await;
        insert_owned(&mut tables, |t| &mut t.reviews, location_id, position, review)
    }
}

#[async_trait]
impl MovieStore for MemoryStorage {
    async fn find_movies(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<MovieSuggestion>, StorageError> {
        Ok(find_owned(&self.tables.read().await.movies, location_id))
    }

    async fn save_movie(
        &self,
        location_id: LocationId,
        position: usize,
        movie: &MovieSuggestion,
    ) -> Result<SaveOutcome, StorageError> {
        let mut tables = self.tables.write().await;
        insert_owned(&mut tables, |t| &mut t.movies, location_id, position, movie)
    }
}

#[async_trait]
impl FillClaims for MemoryStorage {
    async fn claim_fill(
        &self,
        location_id: LocationId,
        resource: ResourceType,
    ) -> Result<SaveOutcome, StorageError> {
        let mut tables = self.tables.write().await;
        if !tables.has_location(location_id) {
            return Err(StorageError::MissingLocation(format!("location {location_id}")));
        }
        if tables.fills.insert((location_id, resource)) {
            Ok(SaveOutcome::Inserted)
        } else {
            Ok(SaveOutcome::AlreadyCached)
        }
    }

    async fn release_fill(
        &self,
        location_id: LocationId,
        resource: ResourceType,
    ) -> Result<(), StorageError> {
        self.tables.write().await.fills.remove(&(location_id, resource));
        Ok(())
    }
}
