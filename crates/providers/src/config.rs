//! Provider credentials and endpoints, read from the environment.

use std::time::Duration;

use city_explorer_core::{DEFAULT_PROVIDER_TIMEOUT_SECS, env_first, env_or, env_parse_with_default};

use crate::error::ProviderError;
use crate::{DarkSkyClient, GoogleGeocodeClient, TmdbClient, YelpClient};

pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";
pub const DARK_SKY_BASE_URL: &str = "https://api.darksky.net";
pub const YELP_BASE_URL: &str = "https://api.yelp.com";
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org";

pub const GOOGLE_MAPS_KEY_VAR: &str = "GOOGLE_MAPS_API";
pub const DARK_SKY_KEY_VAR: &str = "DARK_SKY_API";
pub const YELP_KEY_VAR: &str = "YELP_API";
pub const TMDB_KEY_VAR: &str = "MOVIES_DB_API";

/// Credential plus endpoint of one upstream API.
#[derive(Clone)]
pub struct Endpoint {
    pub api_key: Option<String>,
    pub base_url: String,
    key_var: &'static str,
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Endpoint {
    #[must_use]
    pub fn new(key_var: &'static str, api_key: Option<String>, base_url: &str) -> Self {
        Self { api_key, base_url: base_url.to_owned(), key_var }
    }

    fn from_env(key_var: &'static str, url_var: &str, default_url: &str) -> Self {
        Self::new(key_var, env_first(&[key_var]), &env_or(url_var, default_url))
    }

    fn key(&self) -> Result<String, ProviderError> {
        self.api_key.clone().ok_or(ProviderError::MissingCredential(self.key_var))
    }
}

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub google_maps: Endpoint,
    pub dark_sky: Endpoint,
    pub yelp: Endpoint,
    pub tmdb: Endpoint,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Read every provider from the environment. Missing keys are only
    /// reported when the corresponding client is built.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            google_maps: Endpoint::from_env(
                GOOGLE_MAPS_KEY_VAR,
                "GOOGLE_MAPS_BASE_URL",
                GOOGLE_MAPS_BASE_URL,
            ),
            dark_sky: Endpoint::from_env(DARK_SKY_KEY_VAR, "DARK_SKY_BASE_URL", DARK_SKY_BASE_URL),
            yelp: Endpoint::from_env(YELP_KEY_VAR, "YELP_BASE_URL", YELP_BASE_URL),
            tmdb: Endpoint::from_env(TMDB_KEY_VAR, "TMDB_BASE_URL", TMDB_BASE_URL),
            timeout: Duration::from_secs(env_parse_with_default(
                "PROVIDER_TIMEOUT_SECS",
                DEFAULT_PROVIDER_TIMEOUT_SECS,
            )),
        }
    }

    pub fn geocode_client(&self) -> Result<GoogleGeocodeClient, ProviderError> {
        GoogleGeocodeClient::new(self.google_maps.key()?, &self.google_maps.base_url, self.timeout)
    }

    pub fn forecast_client(&self) -> Result<DarkSkyClient, ProviderError> {
        DarkSkyClient::new(self.dark_sky.key()?, &self.dark_sky.base_url, self.timeout)
    }

    pub fn business_client(&self) -> Result<YelpClient, ProviderError> {
        YelpClient::new(self.yelp.key()?, &self.yelp.base_url, self.timeout)
    }

    pub fn movie_client(&self) -> Result<TmdbClient, ProviderError> {
        TmdbClient::new(self.tmdb.key()?, &self.tmdb.base_url, self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yelp_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            google_maps: Endpoint::new(GOOGLE_MAPS_KEY_VAR, None, GOOGLE_MAPS_BASE_URL),
            dark_sky: Endpoint::new(DARK_SKY_KEY_VAR, None, DARK_SKY_BASE_URL),
            yelp: Endpoint::new(YELP_KEY_VAR, yelp_key.map(str::to_owned), YELP_BASE_URL),
            tmdb: Endpoint::new(TMDB_KEY_VAR, None, TMDB_BASE_URL),
            timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }

    #[test]
    fn test_missing_key_names_the_variable() {
        let err = config(None).business_client().unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential("YELP_API")));
    }

    #[test]
    fn test_present_key_builds_client() {
        assert!(config(Some("token")).business_client().is_ok());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let rendered = format!("{:?}", config(Some("super-secret")));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
