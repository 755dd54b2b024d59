//! Typed error enum for the provider crate.

use thiserror::Error;

/// Errors from upstream provider calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("not found (HTTP {code})")]
    NotFound { code: u16 },
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// Error reported inside a 200 response body (Google status codes).
    #[error("provider returned {status}: {message}")]
    Api { status: String, message: String },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),
}

impl ProviderError {
    /// Whether the provider answered that the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Upstream HTTP status, when the failure carried one.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { code } | Self::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_only_for_http_failures() {
        assert_eq!(ProviderError::NotFound { code: 404 }.status_code(), Some(404));
        assert_eq!(
            ProviderError::HttpStatus { code: 503, body: String::new() }.status_code(),
            Some(503)
        );
        assert_eq!(ProviderError::MissingCredential("YELP_API").status_code(), None);
    }

    #[test]
    fn test_api_error_message() {
        let err = ProviderError::Api {
            status: "REQUEST_DENIED".to_owned(),
            message: "The provided API key is invalid.".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "provider returned REQUEST_DENIED: The provided API key is invalid."
        );
        assert!(!err.is_not_found());
    }
}
