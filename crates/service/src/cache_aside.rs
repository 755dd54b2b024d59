//! The lookup → fetch → normalize → persist cycle shared by every resource.

use std::fmt;

use async_trait::async_trait;
use city_explorer_core::{NormalizeError, ResourceType};
use city_explorer_providers::ProviderError;
use city_explorer_storage::{SaveOutcome, Saved, StorageError};
use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ServiceError;

/// Where the records of a resolution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Cache,
    Provider,
}

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution<R> {
    /// Records in provider order.
    pub records: Vec<R>,
    pub source: Source,
    /// Provider entries rejected by normalization. Always 0 on a hit.
    pub dropped: usize,
}

impl<R> Resolution<R> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn from_cache(&self) -> bool {
        matches!(self.source, Source::Cache)
    }
}

/// How one resource type is looked up, fetched, normalized and stored.
///
/// `position` passed to [`persist`](Self::persist) is the entry's index in
/// the provider response. A batch is persisted only after
/// [`claim`](Self::claim) returns `Inserted`, so the rows stored under one
/// key always come from a single provider response.
#[async_trait]
pub trait ResourcePolicy: Send + Sync {
    type Key: fmt::Debug + Send + Sync + ?Sized;
    type Raw: Send + Sync;
    type Record: Clone + Send + Sync;

    const RESOURCE: ResourceType;

    async fn lookup(&self, key: &Self::Key) -> Result<Vec<Self::Record>, StorageError>;

    async fn fetch(&self, key: &Self::Key) -> Result<Vec<Self::Raw>, ProviderError>;

    fn normalize(&self, key: &Self::Key, raw: &Self::Raw) -> Result<Self::Record, NormalizeError>;

    async fn persist(
        &self,
        key: &Self::Key,
        position: usize,
        record: &Self::Record,
    ) -> Result<Saved<Self::Record>, StorageError>;

    /// Take ownership of storing the batch for `key`. `AlreadyCached` means a
    /// concurrent miss owns it.
    async fn claim(&self, _key: &Self::Key) -> Result<SaveOutcome, StorageError> {
        Ok(SaveOutcome::Inserted)
    }

    /// Give up a claim after none of the batch could be stored.
    async fn release(&self, _key: &Self::Key) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Cache-aside resolution over any [`ResourcePolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheAside;

impl CacheAside {
    /// Return cached records for `key`, or fetch, normalize and store them.
    ///
    /// Lookup and provider failures are errors. Entries that fail
    /// normalization are dropped and failed writes are logged; neither aborts
    /// the rest of the batch. A miss that loses the batch claim to a
    /// concurrent miss answers with its own records and stores nothing.
    pub async fn resolve<P>(
        policy: &P,
        key: &P::Key,
    ) -> Result<Resolution<P::Record>, ServiceError>
    where
        P: ResourcePolicy,
    {
        let resource = P::RESOURCE;

        let cached = policy.lookup(key).await.map_err(ServiceError::Lookup)?;
        if !cached.is_empty() {
            debug!(%resource, ?key, count = cached.len(), "cache hit");
            return Ok(Resolution { records: cached, source: Source::Cache, dropped: 0 });
        }

        info!(%resource, ?key, "cache miss, calling provider");
        let raw = policy
            .fetch(key)
            .await
            .map_err(|source| ServiceError::Provider { resource, source })?;

        let mut normalized = Vec::with_capacity(raw.len());
        for (position, entry) in raw.iter().enumerate() {
            match policy.normalize(key, entry) {
                Ok(record) => normalized.push((position, record)),
                Err(e) => warn!(%resource, ?key, position, field = e.field(), "dropping entry: {e}"),
            }
        }
        let dropped = raw.len() - normalized.len();
        if dropped > 0 && normalized.is_empty() {
            warn!(%resource, ?key, dropped, "every provider entry was dropped");
        }

        let records = if normalized.is_empty() {
            Vec::new()
        } else {
            Self::store_batch(policy, key, normalized).await
        };

        info!(%resource, ?key, count = records.len(), dropped, "resolved from provider");
        Ok(Resolution { records, source: Source::Provider, dropped })
    }

    /// Store a claimed batch and return the records to answer with.
    ///
    /// Without the claim nothing is written and the caller's own records are
    /// returned as they are.
    async fn store_batch<P>(
        policy: &P,
        key: &P::Key,
        normalized: Vec<(usize, P::Record)>,
    ) -> Vec<P::Record>
    where
        P: ResourcePolicy,
    {
        let resource = P::RESOURCE;
        let unstored = |normalized: Vec<(usize, P::Record)>| {
            normalized.into_iter().map(|(_, record)| record).collect::<Vec<_>>()
        };

        match policy.claim(key).await {
            Ok(SaveOutcome::Inserted) => {},
            Ok(SaveOutcome::AlreadyCached) => {
                debug!(%resource, ?key, "batch claimed by a concurrent request, not storing");
                return unstored(normalized);
            },
            Err(e) => {
                warn!(%resource, ?key, error = %e, "failed to claim batch, not storing");
                return unstored(normalized);
            },
        }

        let writes =
            normalized.iter().map(|(position, record)| policy.persist(key, *position, record));
        let outcomes = join_all(writes).await;

        let mut stored = 0;
        let records = normalized
            .into_iter()
            .zip(outcomes)
            .map(|((position, record), outcome)| match outcome {
                Ok(saved) => {
                    stored += 1;
                    if !saved.outcome.is_inserted() {
                        debug!(%resource, ?key, position, "already cached by a concurrent request");
                    }
                    saved.record
                },
                Err(e) => {
                    warn!(%resource, ?key, position, error = %e, "failed to persist record");
                    record
                },
            })
            .collect::<Vec<_>>();

        if stored == 0 {
            if let Err(e) = policy.release(key).await {
                warn!(%resource, ?key, error = %e, "failed to release batch claim");
            }
        }
        records
    }
}
