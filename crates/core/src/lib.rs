//! Core types for city-explorer
//!
//! Canonical records, raw provider payloads and the pure normalizers that
//! map one onto the other. Shared by every other crate.

pub mod constants;
pub mod env_config;
mod error;
pub mod normalize;
pub mod raw;
mod records;

pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use records::*;
