//! Index API endpoint.
//!
//! Returns the homepage view, or a category listing when `c` is given.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use folio_site::IndexQuery;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::{JSON_CONTENT_TYPE, cached_response};
use crate::state::AppState;

/// Query string of GET /api/index.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct IndexParams {
    /// Category id.
    c: Option<String>,
}

/// Handle GET /api/index.
pub(crate) async fn get_index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexParams>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_index_impl(&state, params, &headers)
}

fn get_index_impl(
    state: &AppState,
    params: IndexParams,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let view = state
        .site
        .index_view(&IndexQuery { category: params.c })?;
    let body = serde_json::to_string(&view)?;

    Ok(cached_response(
        headers,
        &state.version,
        JSON_CONTENT_TYPE,
        "private, max-age=60",
        body,
    ))
}
