//! TMDB movie search client.

use std::time::Duration;

use async_trait::async_trait;
use city_explorer_core::raw::{MovieSearchResponse, RawEntry};

use crate::client::{build_http_client, fetch_json, trim_base_url};
use crate::error::ProviderError;
use crate::traits::MovieProvider;

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TmdbClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self { client: build_http_client(timeout)?, api_key, base_url: trim_base_url(base_url) })
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<Vec<RawEntry>, ProviderError> {
        let request = self
            .client
            .get(format!("{}/3/search/movie", self.base_url))
            .query(&[("api_key", self.api_key.as_str()), ("query", query)]);
        let response: MovieSearchResponse = fetch_json(request, "movie search response").await?;
        Ok(response.results)
    }
}
