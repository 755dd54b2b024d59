use async_trait::async_trait;
use city_explorer_core::Location;

use crate::error::StorageError;
use crate::types::Saved;

/// Locations keyed by the raw search string.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Get the location cached for `search_query`, if any.
    async fn find_location(&self, search_query: &str) -> Result<Option<Location>, StorageError>;

    /// Insert a location. On a `search_query` conflict the existing row is
    /// returned with `SaveOutcome::AlreadyCached`. The returned record always
    /// carries its row id.
    async fn save_location(&self, location: &Location) -> Result<Saved<Location>, StorageError>;
}
