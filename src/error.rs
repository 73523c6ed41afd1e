use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Everything that can go wrong while serving a request.
///
/// Distinct provider failures (rate limits, not found, server errors) keep
/// their status in [`ApiError::Upstream`] for logging, but all of them reach
/// the client as a plain 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingParameter(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    TokenRefresh(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Spotify responded with {status} for {endpoint}")]
    Upstream {
        status: reqwest::StatusCode,
        endpoint: String,
    },

    #[error("Request to Spotify failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) | ApiError::TokenRefresh(_) => StatusCode::UNAUTHORIZED,
            ApiError::Unavailable(_) | ApiError::Upstream { .. } | ApiError::Http(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Collapses any non-auth failure into `Unavailable` with a caller
    /// facing message, so handlers answer with their own wording.
    pub fn or_unavailable(self, message: &str) -> Self {
        match self {
            ApiError::MissingParameter(_)
            | ApiError::BadRequest(_)
            | ApiError::Authentication(_)
            | ApiError::TokenRefresh(_) => self,
            _ => {
                crate::warning!("{}: {}", message, self);
                ApiError::Unavailable(message.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
