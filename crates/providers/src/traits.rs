//! One provider trait per resource type.
//!
//! Implementations perform exactly one upstream call and return the response's
//! entries in order, still undecoded so that one malformed entry cannot sink
//! the others. They never cache.

use async_trait::async_trait;
use city_explorer_core::raw::RawEntry;

use crate::error::ProviderError;

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Best match for a free-text address, `None` when there is none.
    async fn geocode(&self, query: &str) -> Result<Option<RawEntry>, ProviderError>;
}

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Daily forecast data points for a coordinate.
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<RawEntry>, ProviderError>;
}

#[async_trait]
pub trait BusinessProvider: Send + Sync {
    /// Restaurants around a coordinate.
    async fn search_businesses(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<RawEntry>, ProviderError>;
}

#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Movies matching a place name.
    async fn search_movies(&self, query: &str) -> Result<Vec<RawEntry>, ProviderError>;
}
