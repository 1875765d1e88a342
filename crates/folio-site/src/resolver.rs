//! Page resolution.
//!
//! [`PageResolver`] loads category page lists and locates pages in them. Page
//! lists keep the stored order (oldest first, newest last); nothing here
//! re-sorts them.
//!
//! Locating a single page by id runs a [`ResolutionChain`]: an ordered list of
//! [`ResolveStrategy`] values tried until one succeeds. The default chain tries
//! the category hint, then scans every category in catalog order.

use folio_storage::ResourceKey;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::model::{Page, PageRecord};
use crate::slug::sanitize;
use crate::store::StoreError;

/// Default number of similar pages.
pub const DEFAULT_SIMILAR_LIMIT: usize = 8;

/// A page together with the category it was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPage {
    /// The stored record.
    pub page: PageRecord,
    /// Id of the owning category.
    pub category_id: String,
}

/// Loads page lists and finds pages within a request.
pub struct PageResolver<'c, 's> {
    catalog: &'c Catalog<'s>,
}

impl<'c, 's> PageResolver<'c, 's> {
    /// Create a resolver over `catalog`.
    #[must_use]
    pub fn new(catalog: &'c Catalog<'s>) -> Self {
        Self { catalog }
    }

    /// Catalog this resolver reads categories from.
    #[must_use]
    pub fn catalog(&self) -> &'c Catalog<'s> {
        self.catalog
    }

    /// Page list of a category, degrading to empty on any load failure.
    pub fn pages_for(&self, category_id: &str) -> Vec<PageRecord> {
        match self.pages_for_strict(category_id) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!(category = %category_id, error = %e, "Category unavailable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Page list of a category, surfacing unreadable or malformed data.
    ///
    /// A category that does not exist (or whose id sanitizes to nothing) is
    /// still an empty list; only read, parse and schema failures are errors.
    pub fn pages_for_strict(&self, category_id: &str) -> Result<Vec<PageRecord>, StoreError> {
        let id = sanitize(category_id);
        if id.is_empty() {
            return Ok(Vec::new());
        }

        let doc = match self.catalog.store().load(&ResourceKey::category(id.as_str())) {
            Ok(doc) => doc,
            Err(e) if e.is_not_found() => {
                tracing::debug!(category = %id, "Category resource not found");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        Ok(doc
            .get("pages")
            .and_then(Value::as_array)
            .map(|pages| {
                pages
                    .iter()
                    .map(|p| PageRecord::from_value(p, &id))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Newest (last stored) page of a category.
    pub fn newest(&self, category_id: &str) -> Option<PageRecord> {
        self.pages_for(category_id).pop()
    }

    /// Find a page by exact id within one category.
    pub fn find_page_in_category(&self, category_id: &str, page_id: &str) -> Option<PageRecord> {
        self.pages_for(category_id)
            .into_iter()
            .find(|p| p.has_id(page_id))
    }

    /// Find a page by id across all categories, in catalog order.
    ///
    /// Page ids are only unique within a category; when several categories
    /// hold the same id, the first category in sorted order wins.
    pub fn find_page_global(&self, page_id: &str) -> Option<ResolvedPage> {
        self.catalog.list_categories_sorted().iter().find_map(|c| {
            self.find_page_in_category(&c.id, page_id)
                .map(|page| ResolvedPage {
                    page,
                    category_id: c.id.clone(),
                })
        })
    }

    /// Newest-first displayable pages of a category, excluding `exclude_page_id`.
    pub fn similar_pages(&self, category_id: &str, exclude_page_id: &str, limit: usize) -> Vec<Page> {
        self.pages_for(category_id)
            .iter()
            .rev()
            .filter(|p| !p.has_id(exclude_page_id))
            .filter_map(PageRecord::complete)
            .take(limit)
            .collect()
    }
}

/// One way of locating a page by id.
pub trait ResolveStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Try to resolve `page_id`, optionally guided by a category `hint`.
    fn resolve(
        &self,
        resolver: &PageResolver<'_, '_>,
        page_id: &str,
        hint: Option<&str>,
    ) -> Option<ResolvedPage>;
}

/// Look in the hinted category only.
pub struct HintedCategory;

impl ResolveStrategy for HintedCategory {
    fn name(&self) -> &'static str {
        "hinted-category"
    }

    fn resolve(
        &self,
        resolver: &PageResolver<'_, '_>,
        page_id: &str,
        hint: Option<&str>,
    ) -> Option<ResolvedPage> {
        let hint = hint?;
        resolver
            .find_page_in_category(hint, page_id)
            .map(|page| ResolvedPage {
                page,
                category_id: hint.to_owned(),
            })
    }
}

/// Scan every category in catalog order.
pub struct GlobalScan;

impl ResolveStrategy for GlobalScan {
    fn name(&self) -> &'static str {
        "global-scan"
    }

    fn resolve(
        &self,
        resolver: &PageResolver<'_, '_>,
        page_id: &str,
        _hint: Option<&str>,
    ) -> Option<ResolvedPage> {
        resolver.find_page_global(page_id)
    }
}

/// Ordered list of strategies; the first hit wins.
pub struct ResolutionChain {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl Default for ResolutionChain {
    fn default() -> Self {
        Self::new(vec![Box::new(HintedCategory), Box::new(GlobalScan)])
    }
}

impl ResolutionChain {
    /// Create a chain from strategies in priority order.
    #[must_use]
    pub fn new(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Resolve `page_id`; an empty id never resolves.
    pub fn resolve(
        &self,
        resolver: &PageResolver<'_, '_>,
        page_id: &str,
        hint: Option<&str>,
    ) -> Option<ResolvedPage> {
        if page_id.is_empty() {
            return None;
        }
        self.strategies.iter().find_map(|strategy| {
            let hit = strategy.resolve(resolver, page_id, hint);
            if hit.is_some() {
                tracing::debug!(page = %page_id, strategy = strategy.name(), "Page resolved");
            }
            hit
        })
    }
}
