//! Request entry points.
//!
//! [`Site`] is the long-lived, shareable object: it owns the storage backend,
//! the options and the page resolution chain. Every call builds a fresh
//! [`JsonStore`] so memoized documents never outlive a single request.

use std::sync::Arc;

use chrono::NaiveDate;
use folio_storage::Storage;

use crate::catalog::Catalog;
use crate::error::SiteError;
use crate::resolver::{DEFAULT_SIMILAR_LIMIT, PageResolver, ResolutionChain};
use crate::sitemap::{self, DEFAULT_PAGE_SIZE, SitemapAssembler, SitemapEntry};
use crate::slug::sanitize_param;
use crate::store::JsonStore;
use crate::urls::UrlBuilder;
use crate::view::{IndexView, PageView, ViewContext};

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteOptions {
    /// Base URL for absolute links. Overrides the index's `site.baseUrl`.
    pub base_url: Option<String>,
    /// Maximum number of similar pages on a single-page view.
    pub similar_limit: usize,
    /// URLs per page sitemap.
    pub sitemap_page_size: usize,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            similar_limit: DEFAULT_SIMILAR_LIMIT,
            sitemap_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query parameters of the index route.
#[derive(Clone, Debug, Default)]
pub struct IndexQuery {
    /// Raw `c` parameter.
    pub category: Option<String>,
}

/// Query parameters of the single-page route.
#[derive(Clone, Debug, Default)]
pub struct PageQuery {
    /// Raw `id` parameter.
    pub id: Option<String>,
    /// Raw `c` parameter (category hint).
    pub category: Option<String>,
}

/// Catalog site over a storage backend.
pub struct Site {
    storage: Arc<dyn Storage>,
    options: SiteOptions,
    chain: ResolutionChain,
}

impl Site {
    /// Create a site with the default resolution chain.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, options: SiteOptions) -> Self {
        Self::with_chain(storage, options, ResolutionChain::default())
    }

    /// Create a site with a custom resolution chain.
    #[must_use]
    pub fn with_chain(
        storage: Arc<dyn Storage>,
        options: SiteOptions,
        chain: ResolutionChain,
    ) -> Self {
        Self {
            storage,
            options,
            chain,
        }
    }

    /// Run `f` against a fresh request scope.
    fn with_request<T>(&self, f: impl FnOnce(&PageResolver<'_, '_>, &UrlBuilder) -> T) -> T {
        let store = JsonStore::new(Arc::clone(&self.storage));
        let catalog = Catalog::new(&store);
        let resolver = PageResolver::new(&catalog);
        let base = self
            .options
            .base_url
            .as_deref()
            .or(catalog.site_config().base_url.as_deref());
        let urls = UrlBuilder::new(base);
        f(&resolver, &urls)
    }

    /// Home view when `c` is absent or sanitizes to nothing, category view otherwise.
    pub fn index_view(&self, query: &IndexQuery) -> Result<IndexView, SiteError> {
        let category = sanitize_param(query.category.as_deref());
        self.with_request(|resolver, urls| {
            let view = ViewContext { resolver, urls };
            match category {
                Some(id) => view.category(&id).map(IndexView::Category),
                None => Ok(IndexView::Home(view.home())),
            }
        })
    }

    /// Single-page view; [`SiteError::NotFound`] when the page cannot be resolved.
    pub fn page_view(&self, query: &PageQuery) -> Result<PageView, SiteError> {
        let id = sanitize_param(query.id.as_deref()).unwrap_or_default();
        let hint = sanitize_param(query.category.as_deref());
        self.with_request(|resolver, urls| {
            ViewContext { resolver, urls }.page(
                &self.chain,
                &id,
                hint.as_deref(),
                self.options.similar_limit,
            )
        })
    }

    fn with_sitemap<T>(
        &self,
        today: NaiveDate,
        f: impl FnOnce(&SitemapAssembler<'_, '_, '_>) -> T,
    ) -> T {
        self.with_request(|resolver, urls| {
            f(&SitemapAssembler {
                resolver,
                urls,
                page_size: self.options.sitemap_page_size,
                today,
            })
        })
    }

    /// Sitemap index entries.
    pub fn sitemap_index(&self, today: NaiveDate) -> Vec<SitemapEntry> {
        self.with_sitemap(today, |sm| sm.sitemap_index())
    }

    /// Sitemap index entries for statically generated page sitemap files.
    pub fn static_sitemap_index(&self, today: NaiveDate) -> Vec<SitemapEntry> {
        self.with_sitemap(today, |sm| sm.static_sitemap_index())
    }

    /// Category sitemap entries.
    pub fn categories_sitemap(&self, today: NaiveDate) -> Vec<SitemapEntry> {
        self.with_sitemap(today, |sm| sm.categories_sitemap())
    }

    /// Entries of page sitemap `n` (raw query value).
    pub fn pages_sitemap(
        &self,
        n: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<SitemapEntry>, SiteError> {
        let n = sitemap::parse_page_number(n)?;
        Ok(self.pages_sitemap_at(n, today))
    }

    /// Entries of page sitemap `n` (one-based, already validated).
    pub fn pages_sitemap_at(&self, n: usize, today: NaiveDate) -> Vec<SitemapEntry> {
        self.with_sitemap(today, |sm| sm.pages_sitemap(n))
    }

    /// Number of page sitemaps the catalog currently needs.
    pub fn page_sitemap_count(&self) -> usize {
        self.with_sitemap(NaiveDate::MIN, |sm| {
            sitemap::page_sitemap_count(sm.total_pages(), sm.page_size)
        })
    }

    /// Whether generated URLs will be absolute.
    pub fn has_base_url(&self) -> bool {
        self.with_request(|_, urls| urls.has_base())
    }
}
