//! Service layer for city-explorer
//!
//! Cache-aside resolution of locations, forecasts, reviews and movies,
//! between the HTTP/CLI front ends and storage/providers.

#![allow(missing_debug_implementations, reason = "Policies hold trait objects")]

mod cache_aside;
mod coordinator;
mod error;
mod policies;


pub use cache_aside::{CacheAside, Resolution, ResourcePolicy, Source};
pub use coordinator::{Coordinator, Providers, ResourceQuery, Resolved};
pub use error::ServiceError;
pub use policies::{ForecastPolicy, LocationPolicy, MoviePolicy, ReviewPolicy};
