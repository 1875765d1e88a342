//! View assembly.
//!
//! Composes catalog and resolver output into the data a presentation layer
//! needs. All strings are raw (unescaped); escaping is the renderer's job and
//! happens exactly once there.

use serde::Serialize;

use crate::error::SiteError;
use crate::model::{Category, GridItem, PageRecord};
use crate::resolver::{PageResolver, ResolutionChain};
use crate::urls::{self, UrlBuilder};

/// Placeholder name for a category missing from the index.
const CATEGORY_PLACEHOLDER: &str = "Category";

/// Prefix `text` with `n` unless `n` is zero.
///
/// ```
/// use folio_site::count_prefix;
///
/// assert_eq!(count_prefix(0, "Coloring Pages"), "Coloring Pages");
/// assert_eq!(count_prefix(5, "Coloring Pages"), "5 Coloring Pages");
/// ```
#[must_use]
pub fn count_prefix(n: usize, text: &str) -> String {
    if n > 0 {
        format!("{n} {text}")
    } else {
        text.to_owned()
    }
}

/// Navigation entry for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryLink {
    /// Category id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Link target.
    pub href: String,
}

impl CategoryLink {
    fn from_category(category: &Category) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
            href: urls::category_path(&category.id),
        }
    }
}

/// Homepage: the newest page of every category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    /// Document title (the site title).
    pub title: String,
    /// Heading, prefixed with the total page count.
    pub h1: String,
    /// Site description.
    pub description: String,
    /// Root-relative canonical path (`/`).
    pub canonical_path: String,
    /// Canonical URL, absolute when a base URL is known.
    pub canonical_url: String,
    /// Newest page of each category, in catalog order.
    pub grid: Vec<GridItem>,
    /// Category menu.
    pub categories: Vec<CategoryLink>,
}

/// Listing of one category, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    /// Sanitized category id.
    pub category_id: String,
    /// Document title (same as `h1`).
    pub title: String,
    /// Category name, prefixed with the displayed page count.
    pub h1: String,
    /// Category description, falling back to the site description.
    pub description: String,
    /// Root-relative canonical path (`/?c=<id>`).
    pub canonical_path: String,
    /// Canonical URL, absolute when a base URL is known.
    pub canonical_url: String,
    /// Displayable pages, newest first.
    pub grid: Vec<GridItem>,
    /// Category menu.
    pub categories: Vec<CategoryLink>,
}

/// Output of the index route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum IndexView {
    /// No category requested.
    Home(HomeView),
    /// A category listing.
    Category(CategoryView),
}

/// Link back to the owning category from a single page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoreLink {
    /// Link text (`More <name>`).
    pub label: String,
    /// Link target (`/?c=<id>`).
    pub href: String,
    /// Heading above the similar pages.
    pub title: String,
}

/// A single printable page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Requested page id.
    pub page_id: String,
    /// Category the page was resolved in.
    pub category_id: String,
    /// Page title.
    pub title: String,
    /// `<page title> | <site title>`.
    pub document_title: String,
    /// Page, category or site description, first one present.
    pub description: String,
    /// Page description, falling back to the title.
    pub meta_description: String,
    /// Root-relative canonical path (`/page?id=<id>&c=<category>`).
    pub canonical_path: String,
    /// Canonical URL, absolute when a base URL is known.
    pub canonical_url: String,
    /// Image path or absolute URL.
    pub image_src: String,
    /// Other displayable pages of the category, newest first.
    pub similar: Vec<GridItem>,
    /// Absent when the owning category is missing from the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more: Option<MoreLink>,
}

/// Inputs shared by all assemblers in one request.
pub struct ViewContext<'r, 'c, 's> {
    pub resolver: &'r PageResolver<'c, 's>,
    pub urls: &'r UrlBuilder,
}

impl ViewContext<'_, '_, '_> {
    fn category_links(&self) -> Vec<CategoryLink> {
        self.resolver
            .catalog()
            .list_categories_sorted()
            .iter()
            .map(CategoryLink::from_category)
            .collect()
    }

    /// Assemble the homepage.
    pub fn home(&self) -> HomeView {
        let catalog = self.resolver.catalog();
        let site = catalog.site_config();

        let mut total = 0;
        let mut grid = Vec::new();
        for category in catalog.list_categories_sorted() {
            let mut pages = self.resolver.pages_for(&category.id);
            total += pages.len();
            if let Some(page) = pages.pop().as_ref().and_then(PageRecord::complete) {
                grid.push(page.into_grid_item(&category.id));
            }
        }

        HomeView {
            title: site.title.clone(),
            h1: count_prefix(total, &site.h1),
            description: site.description.clone(),
            canonical_path: urls::HOME_PATH.to_owned(),
            canonical_url: self.urls.url(urls::HOME_PATH),
            grid,
            categories: self.category_links(),
        }
    }

    /// Assemble a category listing for an already sanitized, non-empty id.
    ///
    /// A category missing from the index renders with a placeholder name.
    /// Its page list is read strictly: unreadable or malformed data is an
    /// error, a missing file is an empty grid.
    pub fn category(&self, category_id: &str) -> Result<CategoryView, SiteError> {
        let catalog = self.resolver.catalog();
        let site = catalog.site_config();
        let category = catalog.find_category(category_id);

        let grid: Vec<GridItem> = self
            .resolver
            .pages_for_strict(category_id)?
            .iter()
            .rev()
            .filter_map(PageRecord::complete)
            .map(|p| p.into_grid_item(category_id))
            .collect();

        let name = category.map_or(CATEGORY_PLACEHOLDER, |c| c.name.as_str());
        let h1 = count_prefix(grid.len(), name);
        let description = category
            .and_then(|c| c.description.clone())
            .unwrap_or_else(|| site.description.clone());
        let canonical_path = urls::category_path(category_id);

        Ok(CategoryView {
            category_id: category_id.to_owned(),
            title: h1.clone(),
            h1,
            description,
            canonical_url: self.urls.url(&canonical_path),
            canonical_path,
            grid,
            categories: self.category_links(),
        })
    }

    /// Assemble a single-page view.
    ///
    /// `page_id` and `hint` must already be sanitized; an empty id is not found.
    pub fn page(
        &self,
        chain: &ResolutionChain,
        page_id: &str,
        hint: Option<&str>,
        similar_limit: usize,
    ) -> Result<PageView, SiteError> {
        let resolved = chain
            .resolve(self.resolver, page_id, hint)
            .ok_or_else(|| SiteError::NotFound(page_id.to_owned()))?;

        let catalog = self.resolver.catalog();
        let site = catalog.site_config();
        let category = catalog.find_category(&resolved.category_id);
        let page = &resolved.page;
        let cid = resolved.category_id.as_str();

        let title = page.title.clone().unwrap_or_default();
        let document_title = if site.title.is_empty() {
            title.clone()
        } else {
            format!("{title} | {}", site.title)
        };
        let description = page
            .description
            .clone()
            .or_else(|| category.and_then(|c| c.description.clone()))
            .unwrap_or_else(|| site.description.clone());
        let meta_description = page.description.clone().unwrap_or_else(|| title.clone());
        let canonical_path = urls::page_path(page_id, cid);

        let similar = self
            .resolver
            .similar_pages(cid, page_id, similar_limit)
            .into_iter()
            .map(|p| p.into_grid_item(cid))
            .collect();

        let more = category.map(|c| MoreLink {
            label: format!("More {}", c.name),
            href: urls::category_path(cid),
            title: format!("Similar Free Printable {} You May Like", c.name),
        });

        Ok(PageView {
            page_id: page_id.to_owned(),
            category_id: cid.to_owned(),
            title,
            document_title,
            description,
            meta_description,
            canonical_url: self.urls.url(&canonical_path),
            canonical_path,
            image_src: page.image.clone().unwrap_or_default(),
            similar,
            more,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::Catalog;
    use crate::resolver::DEFAULT_SIMILAR_LIMIT;
    use crate::store::{JsonStore, StoreError};

    const INDEX: &str = r#"{
        "site": {"title": "Coloring", "h1": "Coloring Pages", "description": "Site desc"},
        "categories": [
            {"id": "sea", "name": "sea life", "description": "Fish and more"},
            {"id": "animals", "name": "Animals"},
            {"id": "empty", "name": "Empty"}
        ]
    }"#;

    fn storage() -> MockStorage {
        MockStorage::new()
            .with_index(INDEX)
            .with_category(
                "animals",
                r#"{"pages":[
                    {"id":"a","title":"Cat","image":"cat.png","description":"A cat"},
                    {"id":"b","title":"Dog","image":"dog.png"},
                    {"id":"c","title":"Cow","image":"cow.png"}
                ]}"#,
            )
            .with_category(
                "sea",
                r#"{"pages":[
                    {"id":"f","title":"Fish","image":"fish.png"},
                    {"id":"g","title":"Broken"}
                ]}"#,
            )
            .with_category("empty", r#"{"pages":[]}"#)
    }

    macro_rules! with_view {
        ($storage:expr, $base:expr, |$view:ident| $body:block) => {{
            let store = JsonStore::new(Arc::new($storage));
            let catalog = Catalog::new(&store);
            let resolver = PageResolver::new(&catalog);
            let urls = UrlBuilder::new($base);
            let $view = ViewContext {
                resolver: &resolver,
                urls: &urls,
            };
            $body
        }};
    }

    fn grid_ids(grid: &[GridItem]) -> Vec<&str> {
        grid.iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    fn test_count_prefix() {
        assert_eq!(count_prefix(0, "Coloring Pages"), "Coloring Pages");
        assert_eq!(count_prefix(5, "Coloring Pages"), "5 Coloring Pages");
    }

    #[test]
    fn test_home_view() {
        with_view!(storage(), None, |view| {
            let home = view.home();

            assert_eq!(home.title, "Coloring");
            assert_eq!(home.h1, "5 Coloring Pages");
            assert_eq!(home.description, "Site desc");
            assert_eq!(home.canonical_path, "/");
            // Animals, Empty, sea life; sea's newest record is incomplete
            assert_eq!(grid_ids(&home.grid), vec!["c"]);
            assert_eq!(home.grid[0].category, "animals");
            assert_eq!(home.grid[0].image, "categories/animals/cow.png");
            assert_eq!(
                home.categories
                    .iter()
                    .map(|c| c.id.as_str())
                    .collect::<Vec<_>>(),
                vec!["animals", "empty", "sea"]
            );
        });
    }

    #[test]
    fn test_home_view_malformed_category_counts_zero() {
        let storage = MockStorage::new()
            .with_index(INDEX)
            .with_category("animals", r#"{"pages":"nope"}"#)
            .with_category("sea", r#"{"pages":[{"id":"f","title":"Fish","image":"f.png"}]}"#);

        with_view!(storage, None, |view| {
            let home = view.home();

            assert_eq!(home.h1, "1 Coloring Pages");
            assert_eq!(grid_ids(&home.grid), vec!["f"]);
        });
    }

    #[test]
    fn test_home_view_empty_catalog() {
        with_view!(MockStorage::new(), Some("https://example.com"), |view| {
            let home = view.home();

            assert_eq!(home.h1, "");
            assert!(home.grid.is_empty());
            assert_eq!(home.canonical_url, "https://example.com/");
        });
    }

    #[test]
    fn test_category_view_newest_first() {
        with_view!(storage(), None, |view| {
            let cat = view.category("animals").unwrap();

            assert_eq!(grid_ids(&cat.grid), vec!["c", "b", "a"]);
            assert_eq!(cat.h1, "3 Animals");
            assert_eq!(cat.title, "3 Animals");
            assert_eq!(cat.description, "Site desc");
            assert_eq!(cat.canonical_path, "/?c=animals");
        });
    }

    #[test]
    fn test_category_view_filters_incomplete_and_uses_own_description() {
        with_view!(storage(), Some("https://example.com/"), |view| {
            let cat = view.category("sea").unwrap();

            assert_eq!(grid_ids(&cat.grid), vec!["f"]);
            assert_eq!(cat.h1, "1 sea life");
            assert_eq!(cat.description, "Fish and more");
            assert_eq!(cat.canonical_url, "https://example.com/?c=sea");
        });
    }

    #[test]
    fn test_category_view_unknown_category_uses_placeholder() {
        with_view!(storage(), None, |view| {
            let cat = view.category("unknown").unwrap();

            assert_eq!(cat.h1, "Category");
            assert!(cat.grid.is_empty());
            assert_eq!(cat.description, "Site desc");
        });
    }

    #[test]
    fn test_category_view_malformed_category_fails() {
        let storage = MockStorage::new()
            .with_index(INDEX)
            .with_category("animals", "{broken");

        with_view!(storage, None, |view| {
            let err = view.category("animals").unwrap_err();

            assert!(
                matches!(err, SiteError::Storage(StoreError::Parse { .. })),
                "got {err:?}"
            );
        });
    }

    #[test]
    fn test_page_view() {
        with_view!(storage(), None, |view| {
            let chain = ResolutionChain::default();
            let page = view
                .page(&chain, "b", Some("animals"), DEFAULT_SIMILAR_LIMIT)
                .unwrap();

            assert_eq!(page.title, "Dog");
            assert_eq!(page.document_title, "Dog | Coloring");
            assert_eq!(page.description, "Site desc");
            assert_eq!(page.meta_description, "Dog");
            assert_eq!(page.canonical_path, "/page?id=b&c=animals");
            assert_eq!(page.image_src, "categories/animals/dog.png");
            assert_eq!(grid_ids(&page.similar), vec!["c", "a"]);
            assert_eq!(
                page.more,
                Some(MoreLink {
                    label: "More Animals".to_owned(),
                    href: "/?c=animals".to_owned(),
                    title: "Similar Free Printable Animals You May Like".to_owned(),
                })
            );
        });
    }

    #[test]
    fn test_page_view_description_fallback_chain() {
        with_view!(storage(), None, |view| {
            let chain = ResolutionChain::default();

            let own = view.page(&chain, "a", None, 8).unwrap();
            let from_category = view.page(&chain, "f", None, 8).unwrap();

            assert_eq!(own.description, "A cat");
            assert_eq!(own.meta_description, "A cat");
            assert_eq!(from_category.description, "Fish and more");
        });
    }

    #[test]
    fn test_page_view_wrong_hint_falls_back() {
        with_view!(storage(), None, |view| {
            let chain = ResolutionChain::default();
            let page = view.page(&chain, "f", Some("animals"), 8).unwrap();

            assert_eq!(page.category_id, "sea");
            assert_eq!(page.canonical_path, "/page?id=f&c=sea");
        });
    }

    #[test]
    fn test_page_view_not_found() {
        with_view!(storage(), None, |view| {
            let chain = ResolutionChain::default();

            assert!(matches!(
                view.page(&chain, "zzz", Some("animals"), 8),
                Err(SiteError::NotFound(_))
            ));
            assert!(matches!(
                view.page(&chain, "", None, 8),
                Err(SiteError::NotFound(_))
            ));
        });
    }

    #[test]
    fn test_page_view_category_missing_from_index_omits_more() {
        let storage = MockStorage::new()
            .with_index(r#"{"site":{"title":""},"categories":[]}"#)
            .with_category("stale", r#"{"pages":[{"id":"p","title":"P","image":"p.png"}]}"#);

        with_view!(storage, None, |view| {
            let chain = ResolutionChain::default();
            let page = view.page(&chain, "p", Some("stale"), 8).unwrap();

            assert_eq!(page.more, None);
            assert_eq!(page.document_title, "P");
        });
    }

    fn storage_with_blank_fields() -> MockStorage {
        MockStorage::new()
            .with_index(r#"{"site":{"title":"T","h1":"Pages"},"categories":[{"id":"a","name":"A"}]}"#)
            .with_category(
                "a",
                r#"{"pages":[
                    {"id":"ok","title":"Ok","image":"ok.png"},
                    {"id":"blankimg","title":"Blank","image":"   "},
                    {"id":"","title":"NoId","image":"x.png"}
                ]}"#,
            )
    }

    #[test]
    fn test_blank_display_fields_stay_out_of_grids() {
        with_view!(storage_with_blank_fields(), None, |view| {
            let home = view.home();
            let cat = view.category("a").unwrap();
            let page = view
                .page(&ResolutionChain::default(), "ok", Some("a"), 8)
                .unwrap();

            // newest record has a blank id: counted, not shown
            assert_eq!(home.h1, "3 Pages");
            assert!(home.grid.is_empty());
            assert_eq!(grid_ids(&cat.grid), vec!["ok"]);
            assert_eq!(cat.h1, "1 A");
            assert!(page.similar.is_empty());
        });
    }

    #[test]
    fn test_index_view_serialization_is_tagged() {
        with_view!(storage(), None, |view| {
            let json = serde_json::to_value(IndexView::Home(view.home())).unwrap();

            assert_eq!(json["view"], "home");
            assert_eq!(json["canonicalPath"], "/");
            assert_eq!(json["grid"][0]["category"], "animals");
        });
    }
}
