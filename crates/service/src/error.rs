//! Typed error enum for the service layer.
//!
//! Keeps "the cache could not be read" apart from "the provider failed" so
//! callers can map each to its own response without downcasting.

use city_explorer_core::ResourceType;
use city_explorer_providers::ProviderError;
use city_explorer_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The store lookup failed. Never treated as a miss.
    #[error("lookup failed: {0}")]
    Lookup(#[source] StorageError),

    /// The upstream call for a miss failed; nothing was persisted.
    #[error("{resource} provider: {source}")]
    Provider {
        resource: ResourceType,
        #[source]
        source: ProviderError,
    },

    /// Caller provided an unusable key (blank search query).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is likely transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Lookup(e) => e.is_transient(),
            Self::Provider { source, .. } => matches!(source, ProviderError::HttpRequest(_)),
            Self::InvalidInput(_) => false,
        }
    }

    /// Whether the upstream provider answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Provider { source, .. } if source.is_not_found())
    }

    /// Resource type whose provider failed, if any.
    pub const fn resource(&self) -> Option<ResourceType> {
        match self {
            Self::Provider { resource, .. } => Some(*resource),
            _ => None,
        }
    }
}
