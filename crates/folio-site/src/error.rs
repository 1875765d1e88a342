//! Site-level errors.

use crate::store::StoreError;

/// Error returned by view and sitemap assembly.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Requested page cannot be resolved.
    #[error("Page not found: {0}")]
    NotFound(String),
    /// Request parameter missing or invalid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Explicitly requested resource is unreadable or malformed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}
