//! Google Geocoding API client.

use std::time::Duration;

use async_trait::async_trait;
use city_explorer_core::raw::{GeocodeResponse, RawEntry};

use crate::client::{build_http_client, fetch_json, trim_base_url};
use crate::error::ProviderError;
use crate::traits::GeocodeProvider;

/// Google reports "no match" in-band with a 200 response.
const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

pub struct GoogleGeocodeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GoogleGeocodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocodeClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GoogleGeocodeClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self { client: build_http_client(timeout)?, api_key, base_url: trim_base_url(base_url) })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl GeocodeProvider for GoogleGeocodeClient {
    async fn geocode(&self, query: &str) -> Result<Option<RawEntry>, ProviderError> {
        let request = self
            .client
            .get(format!("{}/maps/api/geocode/json", self.base_url))
            .query(&[("address", query), ("key", self.api_key.as_str())]);
        let response: GeocodeResponse = fetch_json(request, "geocode response").await?;

        match response.status.as_deref() {
            None | Some(STATUS_OK) => Ok(response.results.into_iter().next()),
            Some(STATUS_ZERO_RESULTS) => Ok(None),
            Some(status) => Err(ProviderError::Api {
                status: status.to_owned(),
                message: response.error_message.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GoogleGeocodeClient {
        GoogleGeocodeClient::new("test-key".to_owned(), &server.uri(), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_returns_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .and(query_param("address", "Seattle, WA"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "OK",
                "results": [
                    {
                        "formatted_address": "Seattle, WA, USA",
                        "geometry": {"location": {"lat": 47.6062095, "lng": -122.3320708}},
                        "address_components": [{"long_name": "Seattle", "short_name": "Seattle"}]
                    },
                    {"formatted_address": "Seattle Hill-Silver Firs, WA, USA"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server).geocode("Seattle, WA").await.unwrap().unwrap();
        assert_eq!(result["formatted_address"], "Seattle, WA, USA");
        assert_eq!(result["address_components"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_zero_results_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "ZERO_RESULTS", "results": []})),
            )
            .mount(&server)
            .await;

        assert!(client(&server).geocode("qwzx").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_request_denied_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "results": []
            })))
            .mount(&server)
            .await;

        let err = client(&server).geocode("Seattle, WA").await.unwrap_err();
        match err {
            ProviderError::Api { status, message } => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "The provided API key is invalid.");
            },
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).geocode("Seattle, WA").await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("backend exploded"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/maps/api/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let err = client(&server).geocode("Seattle, WA").await.unwrap_err();
        assert!(matches!(err, ProviderError::JsonParse { .. }));
    }
}
