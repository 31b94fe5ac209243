// ---------------------------------------------------------------------------
// API error types
// ---------------------------------------------------------------------------

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use agentwatch_forecast::ForecastError;
use agentwatch_search::SearchError;
use agentwatch_store::StoreError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input.
    BadRequest(String),
    /// 503 Service Unavailable: search credentials not configured.
    CredentialsMissing,
    /// 502 Bad Gateway: the upstream API rejected our credentials.
    UpstreamAuth,
    /// 502 Bad Gateway: other upstream failure.
    Upstream(String),
    /// 500 Internal Server Error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_key, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::CredentialsMissing => (
                StatusCode::SERVICE_UNAVAILABLE,
                "credentials_missing",
                "search API credentials are not configured".to_string(),
            ),
            ApiError::UpstreamAuth => (
                StatusCode::BAD_GATEWAY,
                "upstream_auth",
                "search API rejected the configured credentials".to_string(),
            ),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg),
            ApiError::Internal(msg) => {
                // Log the real error server-side, return a generic message to
                // the client.
                tracing::error!(details = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ApiErrorBody {
                error: error_key.into(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::MissingCredentials => ApiError::CredentialsMissing,
            SearchError::AuthFailed => ApiError::UpstreamAuth,
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl From<ForecastError> for ApiError {
    fn from(e: ForecastError) -> Self {
        ApiError::Upstream(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            ApiError::CredentialsMissing => write!(f, "credentials missing"),
            ApiError::UpstreamAuth => write!(f, "upstream auth failure"),
            ApiError::Upstream(msg) => write!(f, "upstream error: {msg}"),
            ApiError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}
