//! Sitemap endpoints.
//!
//! Entries are dated with the server's local date at request time.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use chrono::{Local, NaiveDate};
use folio_site::sitemap::{render_sitemap_index, render_urlset};
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::{XML_CONTENT_TYPE, cached_response};
use crate::state::AppState;

const CACHE_CONTROL: &str = "public, max-age=3600";

/// Query string of GET /sitemap_pages.xml.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PagesParams {
    /// One-based page sitemap number.
    n: Option<String>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn xml_response(state: &AppState, headers: &HeaderMap, xml: String) -> Response {
    cached_response(headers, &state.version, XML_CONTENT_TYPE, CACHE_CONTROL, xml)
}

/// Handle GET /sitemap.xml.
pub(crate) async fn get_sitemap_index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let entries = state.site.sitemap_index(today());
    let xml = render_sitemap_index(&entries)?;
    Ok(xml_response(&state, &headers, xml))
}

/// Handle GET /sitemap_categories.xml.
pub(crate) async fn get_categories_sitemap(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let entries = state.site.categories_sitemap(today());
    let xml = render_urlset(&entries)?;
    Ok(xml_response(&state, &headers, xml))
}

/// Handle GET /sitemap_pages.xml?n=.
pub(crate) async fn get_pages_sitemap(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PagesParams>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let entries = state.site.pages_sitemap(params.n.as_deref(), today())?;
    let xml = render_urlset(&entries)?;
    Ok(xml_response(&state, &headers, xml))
}
