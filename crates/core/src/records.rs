use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Row id of a stored location.
pub type LocationId = i64;

/// The four kinds of cacheable data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Location,
    DailyForecast,
    BusinessReview,
    MovieSuggestion,
}

impl ResourceType {
    pub const ALL: [Self; 4] =
        [Self::Location, Self::DailyForecast, Self::BusinessReview, Self::MovieSuggestion];

    /// Short name used in routes, logs and the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::DailyForecast => "weather",
            Self::BusinessReview => "yelp",
            Self::MovieSuggestion => "movies",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "location" => Ok(Self::Location),
            "weather" => Ok(Self::DailyForecast),
            "yelp" => Ok(Self::BusinessReview),
            "movies" => Ok(Self::MovieSuggestion),
            other => Err(format!("unknown resource type: {other}")),
        }
    }
}

/// A geocoded search query.
///
/// `id` is `None` until the store has assigned a row to it. A location that
/// could not be persisted keeps `None` and cannot anchor dependent lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LocationId>,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    pub short_name: String,
}

impl Location {
    #[must_use]
    pub fn with_id(mut self, id: LocationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Key for the dependent resource types, if this location has been stored.
    #[must_use]
    pub fn reference(&self) -> Option<LocationRef> {
        self.id.map(|id| LocationRef {
            id,
            latitude: self.latitude,
            longitude: self.longitude,
            short_name: self.short_name.clone(),
        })
    }
}

/// Lookup key of forecasts, reviews and movies: the owning location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    pub id: LocationId,
    pub latitude: f64,
    pub longitude: f64,
    pub short_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Calendar day, e.g. `"Tue Oct 18 2026"`.
    pub time: String,
    pub forecast: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessReview {
    pub name: String,
    pub image_url: String,
    pub price: Option<String>,
    pub rating: f64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSuggestion {
    pub title: String,
    pub overview: String,
    pub average_votes: f64,
    pub total_votes: i64,
    pub image_url: Option<String>,
    pub popularity: f64,
    pub released_on: NaiveDate,
}
