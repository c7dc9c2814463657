use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use constants::network::{MISSING_REGISTRATION_ERROR, UPSTREAM_FAILURE_ERROR};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("request has no registration")]
    MissingRegistration,
    #[error("upstream request failed: {0}")]
    Upstream(reqwest::Error),
    #[error("upstream returned invalid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

// Upstream URLs carry the API key, so they never reach the error text.
impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.without_url())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::MissingRegistration => (StatusCode::BAD_REQUEST, MISSING_REGISTRATION_ERROR),
            Self::Upstream(_) | Self::InvalidBody(_) => {
                error!("Error fetching vehicle data: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_ERROR)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
