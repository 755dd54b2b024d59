use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;

/// Longest body excerpt carried in an error.
pub const MAX_ERROR_BODY_LEN: usize = 200;

/// Build the HTTP client shared by one provider.
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::ClientInit(e.to_string()))
}

/// Send `request` once and decode a JSON body.
///
/// 404 becomes `NotFound`, any other non-2xx `HttpStatus`; no retries.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    context: &str,
) -> Result<T, ProviderError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        tracing::debug!(context, "provider answered 404");
        return Err(ProviderError::NotFound { code: status.as_u16() });
    }
    if !status.is_success() {
        let body =
            response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
        tracing::warn!(context, status = status.as_u16(), "provider returned error status");
        return Err(ProviderError::HttpStatus {
            code: status.as_u16(),
            body: truncate(&body, MAX_ERROR_BODY_LEN).to_owned(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::JsonParse {
        context: format!("{context} (body: {})", truncate(&body, MAX_ERROR_BODY_LEN)),
        source: e,
    })
}

/// Normalise a configured base URL.
pub(crate) fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_owned()
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
