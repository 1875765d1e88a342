//! Link building.
//!
//! Every identifier placed in a generated URL is percent-encoded with the
//! RFC 3986 unreserved set left intact. Paths are root-relative; [`UrlBuilder`]
//! prefixes them with the site's base URL when one is known.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters to encode: everything except `A-Z a-z 0-9 - _ . ~`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a URL query component.
#[must_use]
pub fn encode(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Path of the homepage.
pub const HOME_PATH: &str = "/";

/// Path of the sitemap listing categories.
pub const CATEGORIES_SITEMAP_PATH: &str = "/sitemap_categories.xml";

/// Path of the paginated page sitemaps (takes `?n=`).
pub const PAGES_SITEMAP_PATH: &str = "/sitemap_pages.xml";

/// Path of a category listing: `/?c=<id>`.
#[must_use]
pub fn category_path(category_id: &str) -> String {
    format!("/?c={}", encode(category_id))
}

/// Path of a single page: `/page?id=<id>&c=<category>`.
#[must_use]
pub fn page_path(page_id: &str, category_id: &str) -> String {
    format!("/page?id={}&c={}", encode(page_id), encode(category_id))
}

/// Path of the `n`-th page sitemap.
#[must_use]
pub fn pages_sitemap_path(n: usize) -> String {
    format!("{PAGES_SITEMAP_PATH}?n={n}")
}

/// File name of the `n`-th statically generated page sitemap.
#[must_use]
pub fn static_pages_sitemap_file(n: usize) -> String {
    format!("sitemap_pages_{n}.xml")
}

/// Turns root-relative paths into absolute URLs when a base URL is known.
#[derive(Clone, Debug, Default)]
pub struct UrlBuilder {
    base: Option<String>,
}

impl UrlBuilder {
    /// Create a builder; a trailing slash on `base` is dropped.
    #[must_use]
    pub fn new(base: Option<&str>) -> Self {
        let base = base
            .map(|b| b.trim().trim_end_matches('/').to_owned())
            .filter(|b| !b.is_empty());
        Self { base }
    }

    /// Whether absolute URLs will be produced.
    #[must_use]
    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Absolute URL for `path`, or `path` itself without a base.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        match &self.base {
            Some(base) => format!("{base}{path}"),
            None => path.to_owned(),
        }
    }
}
