//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_site::SiteError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Page id could not be resolved.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Query parameter missing or malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Catalog data unreadable or malformed.
    #[error(transparent)]
    Site(SiteError),

    /// Response serialization failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML rendering failed.
    #[error("XML error: {0}")]
    Xml(#[from] std::io::Error),
}

impl From<SiteError> for ServerError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::NotFound(id) => Self::PageNotFound(id),
            SiteError::InvalidParameter(message) => Self::BadRequest(message),
            other @ SiteError::Storage(_) => Self::Site(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PageNotFound(id) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "id": id}),
            ),
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Bad request", "message": message}),
            ),
            Self::Site(e) => {
                tracing::error!(error = %e, "Catalog read failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
            Self::Json(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": e.to_string()}),
            ),
            Self::Xml(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": e.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
