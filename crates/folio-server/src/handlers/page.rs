//! Single-page API endpoint.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use folio_site::PageQuery;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::{JSON_CONTENT_TYPE, cached_response};
use crate::state::AppState;

/// Query string of GET /api/page.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageParams {
    /// Page id.
    id: Option<String>,
    /// Category hint.
    c: Option<String>,
}

/// Handle GET /api/page.
pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(&state, params, &headers)
}

fn get_page_impl(
    state: &AppState,
    params: PageParams,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let query = PageQuery {
        id: params.id,
        category: params.c,
    };
    let view = state.site.page_view(&query)?;
    tracing::debug!(page = %view.page_id, category = %view.category_id, "Page resolved");
    let body = serde_json::to_string(&view)?;

    Ok(cached_response(
        headers,
        &state.version,
        JSON_CONTENT_TYPE,
        "private, max-age=60",
        body,
    ))
}
