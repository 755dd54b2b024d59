//! Upstream provider clients for city-explorer.
//!
//! One trait per resource type ([`traits`]) and one reqwest client per
//! upstream API. Single attempt per call, no retries, no caching.

mod client;
pub mod config;
mod darksky;
pub mod error;
mod geocode;
mod tmdb;
pub mod traits;
mod yelp;

pub use client::truncate;
pub use config::{Endpoint, ProviderConfig};
pub use darksky::DarkSkyClient;
pub use error::ProviderError;
pub use geocode::GoogleGeocodeClient;
pub use tmdb::TmdbClient;
pub use traits::{BusinessProvider, ForecastProvider, GeocodeProvider, MovieProvider};
pub use yelp::YelpClient;
