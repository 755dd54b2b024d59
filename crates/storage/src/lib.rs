//! Storage layer for city-explorer
//!
//! PostgreSQL-backed record store with an in-memory twin, both behind the
//! per-resource traits in [`traits`] and the [`StorageBackend`] enum.

mod backend;
pub mod error;
mod memory;
mod pg_migrations;
mod pg_storage;
pub mod traits;
mod types;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::PgStorage;
pub use types::{SaveOutcome, Saved};
