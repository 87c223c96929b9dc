//! Error types for chalkboard-vis.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for chalkboard-vis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the hosting layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sorting(#[from] chalkboard_sorting::Error),

    #[error(transparent)]
    Structures(#[from] chalkboard_structures::Error),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad configuration value
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        use chalkboard_structures::Error as S;

        match self {
            Error::Sorting(_) | Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::Structures(S::EmptyValue | S::ShapeMismatch(_)) => StatusCode::BAD_REQUEST,
            Error::Structures(
                S::TokenNotFound(_) | S::ParentNotFound(_) | S::NodeNotFound(_) | S::VertexNotFound(_),
            ) => StatusCode::NOT_FOUND,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "ok": false, "error": self.to_string() }))).into_response()
    }
}
