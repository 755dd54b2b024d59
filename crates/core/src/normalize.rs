//! Pure mappings from provider payload entries to canonical records.
//!
//! Each function either produces a complete record or names the field that
//! kept it from doing so. No I/O, no clock: the same entry always yields the
//! same record.

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;

use crate::constants::TMDB_POSTER_BASE_URL;
use crate::error::NormalizeError;
use crate::raw::{GeocodeResult, RawBusiness, RawDailyForecast, RawEntry, RawMovie};
use crate::records::{BusinessReview, DailyForecast, Location, MovieSuggestion};

/// Render format of `DailyForecast::time`.
pub const FORECAST_DATE_FORMAT: &str = "%a %b %d %Y";

/// Format of TMDB `release_date`.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

fn required<T: Clone>(value: Option<&T>, field: &'static str) -> Result<T, NormalizeError> {
    value.cloned().ok_or(NormalizeError::MissingField(field))
}

/// Decode one provider array entry into its payload struct.
///
/// A leaf of the wrong JSON type rejects this entry as
/// [`NormalizeError::InvalidField`] under `path`; its siblings are untouched.
pub fn decode_entry<T: DeserializeOwned>(
    entry: &RawEntry,
    path: &'static str,
) -> Result<T, NormalizeError> {
    T::deserialize(entry)
        .map_err(|e| NormalizeError::InvalidField { field: path, value: e.to_string() })
}

/// Geocode result → `Location` keyed by the caller's raw query.
pub fn normalize_location(
    search_query: &str,
    raw: &GeocodeResult,
) -> Result<Location, NormalizeError> {
    let point = raw
        .geometry
        .as_ref()
        .and_then(|g| g.location.as_ref())
        .ok_or(NormalizeError::MissingField("geometry.location"))?;
    let short_name = raw
        .address_components
        .first()
        .and_then(|c| c.short_name.as_ref());

    Ok(Location {
        id: None,
        search_query: search_query.to_owned(),
        formatted_query: required(raw.formatted_address.as_ref(), "formatted_address")?,
        latitude: required(point.lat.as_ref(), "geometry.location.lat")?,
        longitude: required(point.lng.as_ref(), "geometry.location.lng")?,
        short_name: required(short_name, "address_components[0].short_name")?,
    })
}

/// Dark Sky daily data point → `DailyForecast`. The day is rendered in UTC.
pub fn normalize_forecast(raw: &RawDailyForecast) -> Result<DailyForecast, NormalizeError> {
    let secs = required(raw.time.as_ref(), "daily.data[].time")?;
    let day = DateTime::from_timestamp(secs, 0).ok_or_else(|| NormalizeError::InvalidField {
        field: "daily.data[].time",
        value: secs.to_string(),
    })?;

    Ok(DailyForecast {
        time: day.format(FORECAST_DATE_FORMAT).to_string(),
        forecast: required(raw.summary.as_ref(), "daily.data[].summary")?,
    })
}

/// Yelp business → `BusinessReview`. `price` is the only optional attribute.
pub fn normalize_business(raw: &RawBusiness) -> Result<BusinessReview, NormalizeError> {
    Ok(BusinessReview {
        name: required(raw.name.as_ref(), "businesses[].name")?,
        image_url: required(raw.image_url.as_ref(), "businesses[].image_url")?,
        price: raw.price.clone(),
        rating: required(raw.rating.as_ref(), "businesses[].rating")?,
        url: required(raw.url.as_ref(), "businesses[].url")?,
    })
}

/// TMDB search result → `MovieSuggestion`.
pub fn normalize_movie(raw: &RawMovie) -> Result<MovieSuggestion, NormalizeError> {
    let release_date = required(raw.release_date.as_ref(), "results[].release_date")?;
    let released_on = NaiveDate::parse_from_str(&release_date, RELEASE_DATE_FORMAT).map_err(
        |_| NormalizeError::InvalidField { field: "results[].release_date", value: release_date },
    )?;

    Ok(MovieSuggestion {
        title: required(raw.title.as_ref(), "results[].title")?,
        overview: required(raw.overview.as_ref(), "results[].overview")?,
        average_votes: required(raw.vote_average.as_ref(), "results[].vote_average")?,
        total_votes: required(raw.vote_count.as_ref(), "results[].vote_count")?,
        image_url: raw.poster_path.as_deref().map(poster_url),
        popularity: required(raw.popularity.as_ref(), "results[].popularity")?,
        released_on,
    })
}

fn poster_url(poster_path: &str) -> String {
    format!("{TMDB_POSTER_BASE_URL}{}", poster_path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{AddressComponent, GeocodeGeometry, LatLng};

    fn seattle_result() -> GeocodeResult {
        GeocodeResult {
            formatted_address: Some("Seattle, WA, USA".to_owned()),
            geometry: Some(GeocodeGeometry {
                location: Some(LatLng { lat: Some(47.606_209_2), lng: Some(-122.332_070_8) }),
            }),
            address_components: vec![
                AddressComponent {
                    long_name: Some("Seattle".to_owned()),
                    short_name: Some("Seattle".to_owned()),
                },
                AddressComponent {
                    long_name: Some("Washington".to_owned()),
                    short_name: Some("WA".to_owned()),
                },
            ],
        }
    }

    fn business(name: &str, rating: Option<f64>) -> RawBusiness {
        RawBusiness {
            name: Some(name.to_owned()),
            image_url: Some(format!("https://img.example/{name}.jpg")),
            price: Some("$$".to_owned()),
            rating,
            url: Some(format!("https://www.yelp.com/biz/{name}")),
        }
    }

    fn movie() -> RawMovie {
        RawMovie {
            title: Some("Sleepless in Seattle".to_owned()),
            overview: Some("A widowed architect...".to_owned()),
            vote_average: Some(6.6),
            vote_count: Some(1523),
            poster_path: Some("/afkYP15OeUOD0tFEmj6VvejuOcz.jpg".to_owned()),
            popularity: Some(12.5),
            release_date: Some("1993-06-24".to_owned()),
        }
    }

    #[test]
    fn test_location_maps_all_fields() {
        let location = normalize_location("Seattle, WA", &seattle_result()).unwrap();
        assert_eq!(location.id, None);
        assert_eq!(location.search_query, "Seattle, WA");
        assert_eq!(location.formatted_query, "Seattle, WA, USA");
        assert!((location.latitude - 47.606_209_2).abs() < f64::EPSILON);
        assert!((location.longitude + 122.332_070_8).abs() < f64::EPSILON);
        assert_eq!(location.short_name, "Seattle");
    }

    #[test]
    fn test_location_without_components_is_rejected() {
        let mut raw = seattle_result();
        raw.address_components.clear();
        assert_eq!(
            normalize_location("Seattle, WA", &raw),
            Err(NormalizeError::MissingField("address_components[0].short_name"))
        );
    }

    #[test]
    fn test_location_without_geometry_is_rejected() {
        let mut raw = seattle_result();
        raw.geometry = None;
        let err = normalize_location("Seattle, WA", &raw).unwrap_err();
        assert_eq!(err.field(), "geometry.location");
    }

    #[test]
    fn test_forecast_renders_utc_day() {
        let raw = RawDailyForecast {
            time: Some(1_546_300_800),
            summary: Some("Light rain in the morning.".to_owned()),
        };
        let forecast = normalize_forecast(&raw).unwrap();
        assert_eq!(forecast.time, "Tue Jan 01 2019");
        assert_eq!(forecast.forecast, "Light rain in the morning.");
    }

    #[test]
    fn test_forecast_without_summary_is_rejected() {
        let raw = RawDailyForecast { time: Some(1_546_300_800), summary: None };
        assert_eq!(
            normalize_forecast(&raw),
            Err(NormalizeError::MissingField("daily.data[].summary"))
        );
    }

    #[test]
    fn test_forecast_out_of_range_time_is_invalid() {
        let raw = RawDailyForecast { time: Some(i64::MAX), summary: Some("x".to_owned()) };
        assert!(matches!(
            normalize_forecast(&raw),
            Err(NormalizeError::InvalidField { field: "daily.data[].time", .. })
        ));
    }

    #[test]
    fn test_business_without_rating_is_rejected() {
        assert_eq!(
            normalize_business(&business("pike-place-chowder", None)),
            Err(NormalizeError::MissingField("businesses[].rating"))
        );
    }

    #[test]
    fn test_business_price_is_optional() {
        let mut raw = business("pike-place-chowder", Some(4.5));
        raw.price = None;
        let review = normalize_business(&raw).unwrap();
        assert_eq!(review.price, None);
        assert!((review.rating - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_movie_maps_votes_and_poster() {
        let suggestion = normalize_movie(&movie()).unwrap();
        assert!((suggestion.average_votes - 6.6).abs() < f64::EPSILON);
        assert_eq!(suggestion.total_votes, 1523);
        assert_eq!(
            suggestion.image_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w200_and_h300_bestv2/afkYP15OeUOD0tFEmj6VvejuOcz.jpg")
        );
        assert_eq!(suggestion.released_on, NaiveDate::from_ymd_opt(1993, 6, 24).unwrap());
    }

    #[test]
    fn test_movie_without_poster_has_no_image() {
        let mut raw = movie();
        raw.poster_path = None;
        assert_eq!(normalize_movie(&raw).unwrap().image_url, None);
    }

    #[test]
    fn test_movie_with_blank_release_date_is_invalid() {
        let mut raw = movie();
        raw.release_date = Some(String::new());
        assert_eq!(
            normalize_movie(&raw),
            Err(NormalizeError::InvalidField {
                field: "results[].release_date",
                value: String::new()
            })
        );
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let raw = business("pike-place-chowder", Some(4.5));
        assert_eq!(normalize_business(&raw).unwrap(), normalize_business(&raw).unwrap());
        assert_eq!(normalize_movie(&movie()).unwrap(), normalize_movie(&movie()).unwrap());
        assert_eq!(
            serde_json::to_vec(&normalize_location("Seattle, WA", &seattle_result()).unwrap())
                .unwrap(),
            serde_json::to_vec(&normalize_location("Seattle, WA", &seattle_result()).unwrap())
                .unwrap()
        );
    }

    #[test]
    fn test_decoded_entry_tolerates_missing_leaves() {
        let raw: RawBusiness =
            decode_entry(&serde_json::json!({"name": "No Rating Diner"}), "businesses[]").unwrap();
        assert_eq!(raw.rating, None);
        assert!(normalize_business(&raw).is_err());
    }

    #[test]
    fn test_mistyped_leaf_rejects_only_that_entry() {
        let entries = [
            serde_json::to_value(business("good", Some(4.5))).unwrap(),
            serde_json::json!({"name": "bad", "rating": "4.0"}),
        ];

        let decoded: Vec<Result<RawBusiness, NormalizeError>> =
            entries.iter().map(|e| decode_entry(e, "businesses[]")).collect();

        assert_eq!(decoded[0].as_ref().unwrap().name.as_deref(), Some("good"));
        let err = decoded[1].as_ref().unwrap_err();
        assert_eq!(err.field(), "businesses[]");
        assert!(err.to_string().contains("invalid type"));
    }
}
