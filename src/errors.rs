use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

/// Application-specific error types.
///
/// The taxonomy is deliberately small: slug misses are *not* errors
/// (the store returns `Ok(None)` and handlers map that to `NotFound`),
/// and normalization cannot fail by contract.
#[derive(Debug, Clone)]
pub enum AppError {
    /// The remote store failed after exhausting every fallback tier,
    /// or the single-record path failed in transport or parsing.
    Retrieval(String),
    /// Resource not found (e.g. an unknown company slug).
    NotFound(String),
    /// Internal server error.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Retrieval(msg) => write!(f, "Retrieval error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each variant to a status code and a generic rendered page.
    /// Underlying messages are logged, never leaked into the response.
    fn into_response(self) -> Response {
        let (status, title) = match &self {
            AppError::Retrieval(msg) => {
                tracing::error!("Retrieval error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Something went wrong")
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "Page not found")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        };

        (status, Html(crate::pages::error_page(title))).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Retrieval(err.to_string())
    }
}
