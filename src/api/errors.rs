use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::{api::dtos::ErrorResponse, fetcher::FetchError};

pub const MISSING_URL: &str = "Missing \"url\" query parameter";
pub const FETCH_FAILED: &str = "Failed to fetch the page";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("upstream fetch failed: {0}")]
    Upstream(FetchError),

    #[error("{0}")]
    Internal(String),
}

impl From<FetchError> for ApiError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::InvalidUrl(parse_error) => {
                Self::BadRequest(format!("Invalid \"url\" query parameter: {parse_error}"))
            }
            other => Self::Upstream(other),
        }
    }
}

impl From<csv::Error> for ApiError {
    fn from(error: csv::Error) -> Self {
        Self::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Upstream(fetch_error) => {
                warn!(kind = fetch_error.kind(), error = %fetch_error, "page fetch failed");
                (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED.to_string())
            }
            Self::Internal(message) => {
                error!(error = %message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "An error occurred".to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
