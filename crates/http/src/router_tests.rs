use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use city_explorer_core::raw::RawEntry;
use city_explorer_providers::{
    BusinessProvider, ForecastProvider, GeocodeProvider, MovieProvider, ProviderError,
};
use city_explorer_service::{Coordinator, Providers};
use city_explorer_storage::StorageBackend;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::{AppState, create_router};

#[derive(Default)]
struct Upstream {
    calls: AtomicUsize,
    /// Status returned by every call instead of data.
    fail_with: Option<u16>,
}

impl Upstream {
    fn call(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with {
            Some(404) => Err(ProviderError::NotFound { code: 404 }),
            Some(code) => Err(ProviderError::HttpStatus { code, body: "down".to_owned() }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GeocodeProvider for Upstream {
    async fn geocode(&self, query: &str) -> Result<Option<RawEntry>, ProviderError> {
        self.call()?;
        if query != "Seattle, WA" {
            return Ok(None);
        }
        Ok(Some(serde_json::json!({
            "formatted_address": "Seattle, WA, USA",
            "geometry": {"location": {"lat": 47.6, "lng": -122.3}},
            "address_components": [{"long_name": "Seattle", "short_name": "Seattle"}]
        })))
    }
}

#[async_trait]
impl ForecastProvider for Upstream {
    async fn daily_forecast(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Vec<RawEntry>, ProviderError> {
        self.call()?;
        Ok(vec![serde_json::json!({"time": 1_546_300_800, "summary": "Light rain."})])
    }
}

#[async_trait]
impl BusinessProvider for Upstream {
    async fn search_businesses(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<Vec<RawEntry>, ProviderError> {
        self.call()?;
        Ok(vec![])
    }
}

#[async_trait]
impl MovieProvider for Upstream {
    async fn search_movies(&self, _query: &str) -> Result<Vec<RawEntry>, ProviderError> {
        self.call()?;
        Ok(vec![])
    }
}

fn app(upstream: Arc<Upstream>) -> axum::Router {
    let providers = Providers {
        geocode: Arc::clone(&upstream) as Arc<dyn GeocodeProvider>,
        forecast: Arc::clone(&upstream) as Arc<dyn ForecastProvider>,
        business: Arc::clone(&upstream) as Arc<dyn BusinessProvider>,
        movies: upstream as Arc<dyn MovieProvider>,
    };
    let coordinator = Coordinator::new(Arc::new(StorageBackend::new_memory()), providers);
    create_router(Arc::new(AppState::new(coordinator)))
}

async fn get(router: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_location_then_weather_round_trip() {
    let upstream = Arc::new(Upstream::default());
    let router = app(Arc::clone(&upstream));

    let (status, location) = get(&router, "/location?data=Seattle%2C%20WA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location["id"], 1);
    assert_eq!(location["search_query"], "Seattle, WA");
    assert_eq!(location["formatted_query"], "Seattle, WA, USA");
    assert_eq!(location["short_name"], "Seattle");

    let (status, again) = get(&router, "/location?data=Seattle%2C%20WA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again, location);
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);

    let (status, weather) =
        get(&router, "/weather?id=1&latitude=47.6&longitude=-122.3&short_name=Seattle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(weather[0]["time"], "Tue Jan 01 2019");
    assert_eq!(weather[0]["forecast"], "Light rain.");
}

#[tokio::test]
async fn test_bracketed_parameters_are_accepted() {
    let router = app(Arc::new(Upstream::default()));
    get(&router, "/location?data=Seattle%2C%20WA").await;

    let (status, body) = get(
        &router,
        "/yelp?data%5Bid%5D=1&data%5Blatitude%5D=47.6&data%5Blongitude%5D=-122.3\
         &data%5Bshort_name%5D=Seattle",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_unknown_location_is_404() {
    let router = app(Arc::new(Upstream::default()));

    let (status, body) = get(&router, "/location?data=qwzx").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("qwzx"));
}

#[tokio::test]
async fn test_missing_parameters_are_400() {
    let router = app(Arc::new(Upstream::default()));

    let (status, body) = get(&router, "/movies?id=1&latitude=47.6").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = get(&router, "/location?data=%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provider_failure_is_502() {
    let router = app(Arc::new(Upstream { fail_with: Some(500), ..Upstream::default() }));

    let (status, body) = get(&router, "/location?data=Seattle").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream provider failed");
}

#[tokio::test]
async fn test_upstream_404_is_404() {
    let router = app(Arc::new(Upstream { fail_with: Some(404), ..Upstream::default() }));

    let (status, _) =
        get(&router, "/movies?id=1&latitude=47.6&longitude=-122.3&short_name=Seattle").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_version() {
    let router = app(Arc::new(Upstream::default()));

    let (status, _) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&router, "/api/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
