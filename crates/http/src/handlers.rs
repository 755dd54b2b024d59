use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use city_explorer_core::{BusinessReview, DailyForecast, Location, LocationRef, MovieSuggestion};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{LocationQuery, LocationRefQuery};

fn query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query.map(|Query(q)| q).map_err(|e| ApiError::BadRequest(e.body_text()))
}

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<Location>, ApiError> {
    let params = query(params)?;
    let resolution = state.coordinator.resolve_location(&params.data).await?;
    resolution
        .records
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no location matches '{}'", params.data)))
}

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LocationRefQuery>, QueryRejection>,
) -> Result<Json<Vec<DailyForecast>>, ApiError> {
    let location = LocationRef::from(query(params)?);
    Ok(Json(state.coordinator.resolve_weather(&location).await?.records))
}

pub async fn get_yelp(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LocationRefQuery>, QueryRejection>,
) -> Result<Json<Vec<BusinessReview>>, ApiError> {
    let location = LocationRef::from(query(params)?);
    Ok(Json(state.coordinator.resolve_yelp(&location).await?.records))
}

pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LocationRefQuery>, QueryRejection>,
) -> Result<Json<Vec<MovieSuggestion>>, ApiError> {
    let location = LocationRef::from(query(params)?);
    Ok(Json(state.coordinator.resolve_movies(&location).await?.records))
}
