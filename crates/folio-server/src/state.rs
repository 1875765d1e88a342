//! Application state.
//!
//! Shared state for all request handlers.

use folio_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Catalog site answering every route.
    pub(crate) site: Site,
    /// Application version, mixed into `ETag`s.
    pub(crate) version: String,
}
