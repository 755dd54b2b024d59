//! Yelp Fusion business search client.

use std::time::Duration;

use async_trait::async_trait;
use city_explorer_core::YELP_SEARCH_TERM;
use city_explorer_core::raw::{BusinessSearchResponse, RawEntry};

use crate::client::{build_http_client, fetch_json, trim_base_url};
use crate::error::ProviderError;
use crate::traits::BusinessProvider;

pub struct YelpClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for YelpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YelpClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl YelpClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self { client: build_http_client(timeout)?, api_key, base_url: trim_base_url(base_url) })
    }
}

#[async_trait]
impl BusinessProvider for YelpClient {
    async fn search_businesses(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<RawEntry>, ProviderError> {
        let request = self
            .client
            .get(format!("{}/v3/businesses/search", self.base_url))
            .bearer_auth(&self.api_key)
            .query(&[
                ("term", YELP_SEARCH_TERM.to_owned()),
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
            ]);
        let response: BusinessSearchResponse =
            fetch_json(request, "business search response").await?;
        Ok(response.businesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> YelpClient {
        YelpClient::new("test-token".to_owned(), &server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_sends_bearer_token_and_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/businesses/search"))
            .and(header("Authorization", "Bearer test-token"))
            .and(query_param("term", "restaurants"))
            .and(query_param("latitude", "47.6"))
            .and(query_param("longitude", "-122.3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total": 2,
                "businesses": [
                    {
                        "name": "Pike Place Chowder",
                        "image_url": "https://img.example/chowder.jpg",
                        "price": "$$",
                        "rating": 4.5,
                        "url": "https://www.yelp.com/biz/pike-place-chowder"
                    },
                    {"name": "Unrated Diner"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let businesses = client(&server).search_businesses(47.6, -122.3).await.unwrap();
        assert_eq!(businesses.len(), 2);
        assert_eq!(businesses[0]["rating"], 4.5);
        assert!(businesses[1].get("rating").is_none());
    }

    #[tokio::test]
    async fn test_mistyped_entry_does_not_fail_the_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/businesses/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "businesses": [
                    {"name": "Good", "rating": 4.5},
                    {"name": "Bad", "rating": "4.0"}
                ]
            })))
            .mount(&server)
            .await;

        let businesses = client(&server).search_businesses(47.6, -122.3).await.unwrap();
        assert_eq!(businesses.len(), 2);
        assert_eq!(businesses[0]["name"], "Good");
    }

    #[tokio::test]
    async fn test_unauthorized_is_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/businesses/search"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"code": "TOKEN_INVALID", "description": "Invalid access token"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).search_businesses(47.6, -122.3).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert!(err.to_string().contains("TOKEN_INVALID"));
    }
}
