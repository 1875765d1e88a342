//! HTTP request handlers.

pub(crate) mod index;
pub(crate) mod page;
pub(crate) mod sitemap;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};

/// Content type of JSON API responses.
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of sitemap responses.
pub(crate) const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
pub(crate) fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

/// Build a cacheable response, answering `304 Not Modified` when the
/// request's `If-None-Match` matches the body's `ETag`.
pub(crate) fn cached_response(
    headers: &HeaderMap,
    version: &str,
    content_type: &'static str,
    cache_control: &'static str,
    body: String,
) -> Response {
    let etag = compute_etag(version, &body);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, cache_control.to_owned()),
        ],
        body,
    )
        .into_response()
}
