//! Security headers for catalog responses.
//!
//! Every response is JSON or sitemap XML, so nothing may be framed, sniffed,
//! scripted or sent a referrer.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Headers set on every response, overriding handler values.
pub(crate) const SECURITY_HEADERS: &[(&str, &str)] = &[
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
];

/// One layer per entry of [`SECURITY_HEADERS`].
pub(crate) fn header_layers() -> impl Iterator<Item = SetResponseHeaderLayer<HeaderValue>> {
    SECURITY_HEADERS.iter().map(|&(name, value)| {
        SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        )
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_one_layer_per_header() {
        assert_eq!(header_layers().count(), SECURITY_HEADERS.len());
    }

    #[test]
    fn test_csp_blocks_everything() {
        let (_, csp) = SECURITY_HEADERS
            .iter()
            .find(|(name, _)| *name == "content-security-policy")
            .unwrap();

        assert!(csp.contains("default-src 'none'"));
        assert!(csp.contains("frame-ancestors 'none'"));
    }
}
