//! Typed API error for HTTP handlers.
//!
//! Converts service errors into JSON responses: `{"error": "message"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use city_explorer_service::ServiceError;

/// `Internal` and `BadGateway` log the real error server-side and return
/// a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: missing or malformed query parameters.
    BadRequest(String),
    /// 404 Not Found: no match, or the provider answered 404.
    NotFound(String),
    /// 502 Bad Gateway: the upstream provider failed.
    BadGateway(ServiceError),
    /// 500 Internal Server Error: the store could not be read.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadGateway(err) => {
                tracing::error!(error = %err, resource = ?err.resource(), "provider failure");
                (StatusCode::BAD_GATEWAY, "upstream provider failed".to_owned())
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            },
        };
        let body = serde_json::json!({"error": message});
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            ServiceError::Provider { resource, .. } if err.is_not_found() => {
                Self::NotFound(format!("{resource} not found upstream"))
            },
            ServiceError::Provider { .. } => Self::BadGateway(err),
            ServiceError::Lookup(_) => Self::Internal(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use city_explorer_core::ResourceType;
    use city_explorer_providers::ProviderError;
    use city_explorer_storage::StorageError;

    use super::*;

    fn provider_error(code: u16) -> ServiceError {
        let source = if code == 404 {
            ProviderError::NotFound { code }
        } else {
            ProviderError::HttpStatus { code, body: String::new() }
        };
        ServiceError::Provider { resource: ResourceType::DailyForecast, source }
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(ServiceError::InvalidInput("empty".to_owned())), 400),
            (ApiError::from(provider_error(404)), 404),
            (ApiError::from(provider_error(500)), 502),
            (
                ApiError::from(ServiceError::Lookup(StorageError::Migration("down".to_owned()))),
                500,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status().as_u16(), expected);
        }
    }
}
