//! Category catalog.
//!
//! Reads the site index through a [`JsonStore`] and exposes its categories in
//! display order. The index is always read leniently: a missing or malformed
//! index yields an empty catalog and empty site fields, so the site still
//! renders.

use std::cell::OnceCell;

use folio_storage::ResourceKey;
use serde_json::Value;

use crate::model::{Category, SiteConfig};
use crate::store::JsonStore;

/// Request-scoped view of the site index.
pub struct Catalog<'s> {
    store: &'s JsonStore,
    sorted: OnceCell<Vec<Category>>,
    site: OnceCell<SiteConfig>,
}

impl<'s> Catalog<'s> {
    /// Create a catalog reading from `store`.
    #[must_use]
    pub fn new(store: &'s JsonStore) -> Self {
        Self {
            store,
            sorted: OnceCell::new(),
            site: OnceCell::new(),
        }
    }

    /// Underlying document store.
    #[must_use]
    pub fn store(&self) -> &'s JsonStore {
        self.store
    }

    /// Categories sorted by name, case-insensitively.
    ///
    /// The sort is stable: equal names keep their index order. A missing or
    /// malformed `categories` field is an empty list.
    pub fn list_categories_sorted(&self) -> &[Category] {
        self.sorted.get_or_init(|| {
            let mut categories: Vec<Category> = self
                .index()
                .as_ref()
                .and_then(|index| index.get("categories"))
                .and_then(Value::as_array)
                .map(|entries| entries.iter().filter_map(Category::from_value).collect())
                .unwrap_or_default();
            categories.sort_by_cached_key(|c| c.name.to_ascii_lowercase());
            categories
        })
    }

    /// Find a category by exact id.
    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.list_categories_sorted().iter().find(|c| c.id == id)
    }

    /// Site-level fields, empty strings when missing.
    pub fn site_config(&self) -> &SiteConfig {
        self.site.get_or_init(|| {
            self.index()
                .map(|index| SiteConfig::from_index(&index))
                .unwrap_or_default()
        })
    }

    /// Load the index, logging and discarding failures.
    fn index(&self) -> Option<std::rc::Rc<Value>> {
        match self.store.load(&ResourceKey::Index) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, "Site index unavailable, rendering empty catalog");
                None
            }
        }
    }
}
