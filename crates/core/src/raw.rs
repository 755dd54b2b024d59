//! Provider response bodies, exactly as much of them as the normalizers read.
//!
//! Envelopes are decoded with the body, but array entries stay [`RawEntry`]
//! until [`decode_entry`](crate::normalize::decode_entry) turns each one into
//! its typed struct. A missing or mistyped leaf then rejects only the entry
//! that carries it, never the whole body.

use serde::{Deserialize, Serialize};

/// One provider array entry, not yet decoded.
pub type RawEntry = serde_json::Value;

// ── Google Geocoding ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<RawEntry>,
    pub status: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Option<GeocodeGeometry>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeGeometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

// ── Dark Sky ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub daily: Option<DailyBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub data: Vec<RawEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDailyForecast {
    /// Unix seconds at the start of the day.
    pub time: Option<i64>,
    pub summary: Option<String>,
}

// ── Yelp Fusion ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessSearchResponse {
    #[serde(default)]
    pub businesses: Vec<RawEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBusiness {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

// ── TMDB ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieSearchResponse {
    #[serde(default)]
    pub results: Vec<RawEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMovie {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub poster_path: Option<String>,
    pub popularity: Option<f64>,
    pub release_date: Option<String>,
}
