//! Storage backend trait abstraction
//!
//! One async trait per resource type. `find_*` returns records in provider
//! order (empty when nothing is cached); `save_*` writes one record under the
//! lookup key and treats a unique-key conflict as already cached.

pub mod dependent;
pub mod location;

pub use dependent::{FillClaims, ForecastStore, MovieStore, ReviewStore};
pub use location::LocationStore;

/// Every resource store at once, for callers holding a single handle.
pub trait Store: LocationStore + ForecastStore + ReviewStore + MovieStore + FillClaims {}

impl<T> Store for T where
    T: LocationStore + ForecastStore + ReviewStore + MovieStore + FillClaims + ?Sized
{
}
