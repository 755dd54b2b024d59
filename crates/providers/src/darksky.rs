//! Dark Sky forecast API client.

use std::time::Duration;

use async_trait::async_trait;
use city_explorer_core::raw::{ForecastResponse, RawEntry};

use crate::client::{build_http_client, fetch_json, trim_base_url};
use crate::error::ProviderError;
use crate::traits::ForecastProvider;

pub struct DarkSkyClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for DarkSkyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DarkSkyClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl DarkSkyClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self { client: build_http_client(timeout)?, api_key, base_url: trim_base_url(base_url) })
    }
}

#[async_trait]
impl ForecastProvider for DarkSkyClient {
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<RawEntry>, ProviderError> {
        // The key is a path segment, not a header.
        let url = format!("{}/forecast/{}/{latitude},{longitude}", self.base_url, self.api_key);
        let response: ForecastResponse =
            fetch_json(self.client.get(url), "forecast response").await?;
        Ok(response.daily.map(|daily| daily.data).unwrap_or_default())
    }
}
