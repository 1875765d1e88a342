//! Catalog resolution and view assembly for Folio.
//!
//! This crate turns the raw JSON resources of a printable-pages catalog (one
//! site index plus one page list per category) into presentation data:
//!
//! - [`Site`]: per-request entry points (index, single page, sitemaps)
//! - [`Catalog`]: categories sorted by name, site-level fields
//! - [`PageResolver`]: page lists, newest page, lookups, similar pages
//! - [`ViewContext`]: home, category and single-page view models
//! - [`SitemapAssembler`]: paginated sitemap entries and XML output
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use folio_site::{IndexQuery, Site, SiteOptions};
//! use folio_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("data")));
//! let site = Site::new(storage, SiteOptions::default());
//!
//! let home = site.index_view(&IndexQuery::default())?;
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
mod image;
mod model;
mod resolver;
mod site;
pub mod sitemap;
mod slug;
mod store;
pub mod urls;
mod view;

pub use catalog::Catalog;
pub use error::SiteError;
pub use image::normalize_image_path;
pub use model::{Category, GridItem, Page, PageRecord, SiteConfig};
pub use resolver::{
    DEFAULT_SIMILAR_LIMIT, GlobalScan, HintedCategory, PageResolver, ResolutionChain,
    ResolveStrategy, ResolvedPage,
};
pub use site::{IndexQuery, PageQuery, Site, SiteOptions};
pub use sitemap::{SitemapAssembler, SitemapEntry};
pub use slug::{sanitize, sanitize_param};
pub use store::{JsonStore, StoreError};
pub use view::{
    CategoryLink, CategoryView, HomeView, IndexView, MoreLink, PageView, ViewContext,
    count_prefix,
};
