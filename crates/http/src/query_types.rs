//! Request/query types (Deserialize)
//!
//! The bracketed names are what jQuery-style encoders produce for
//! `{data: {...}}` and are accepted alongside the flat ones.

use city_explorer_core::{LocationId, LocationRef};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationRefQuery {
    #[serde(alias = "data[id]")]
    pub id: LocationId,
    #[serde(alias = "data[latitude]")]
    pub latitude: f64,
    #[serde(alias = "data[longitude]")]
    pub longitude: f64,
    #[serde(alias = "data[short_name]")]
    pub short_name: String,
}

impl From<LocationRefQuery> for LocationRef {
    fn from(query: LocationRefQuery) -> Self {
        Self {
            id: query.id,
            latitude: query.latitude,
            longitude: query.longitude,
            short_name: query.short_name,
        }
    }
}
