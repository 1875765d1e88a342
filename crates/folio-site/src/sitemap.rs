//! Sitemap assembly and XML serialization.
//!
//! Three listings exist:
//!
//! - the sitemap index, pointing at the category sitemap and every page sitemap
//! - the category sitemap: the homepage plus one URL per category
//! - page sitemaps: `(category, page)` pairs, `page_size` per document
//!
//! Pairs are enumerated in catalog order, and within a category in stored
//! order. Every listing is read leniently.

use std::io;

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::SiteError;
use crate::resolver::PageResolver;
use crate::urls::{self, UrlBuilder};

/// Default number of URLs per page sitemap.
pub const DEFAULT_PAGE_SIZE: usize = 40_000;

/// Sitemap protocol namespace.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` or `<sitemap>` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Location (absolute when a base URL is configured).
    pub loc: String,
    /// Last modification date.
    pub lastmod: NaiveDate,
}

/// Parse the `n` parameter of the page sitemap route.
///
/// Missing, non-numeric and non-positive values are rejected. The whole value
/// must be a number: `3abc` is an error, not page 3.
pub fn parse_page_number(raw: Option<&str>) -> Result<usize, SiteError> {
    let raw = raw.ok_or_else(|| SiteError::InvalidParameter("missing n".to_owned()))?;
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(SiteError::InvalidParameter(format!("invalid n: {raw}"))),
    }
}

/// Number of page sitemaps needed for `total` pages (at least one).
#[must_use]
pub fn page_sitemap_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Builds sitemap entries for one request.
pub struct SitemapAssembler<'r, 'c, 's> {
    pub resolver: &'r PageResolver<'c, 's>,
    pub urls: &'r UrlBuilder,
    pub page_size: usize,
    pub today: NaiveDate,
}

impl SitemapAssembler<'_, '_, '_> {
    fn entry(&self, path: &str) -> SitemapEntry {
        SitemapEntry {
            loc: self.urls.url(path),
            lastmod: self.today,
        }
    }

    /// The homepage and every category listing.
    pub fn categories_sitemap(&self) -> Vec<SitemapEntry> {
        let categories = self.resolver.catalog().list_categories_sorted();
        std::iter::once(self.entry(urls::HOME_PATH))
            .chain(
                categories
                    .iter()
                    .map(|c| self.entry(&urls::category_path(&c.id))),
            )
            .collect()
    }

    /// Page URLs in the half-open slice `[(n-1)*size, n*size)`.
    ///
    /// An `n` past the last page yields an empty listing.
    pub fn pages_sitemap(&self, n: usize) -> Vec<SitemapEntry> {
        let size = self.page_size.max(1);
        let start = n.saturating_sub(1).saturating_mul(size);

        self.page_paths()
            .skip(start)
            .take(size)
            .map(|path| self.entry(&path))
            .collect()
    }

    /// Pointers to the category sitemap and every page sitemap.
    pub fn sitemap_index(&self) -> Vec<SitemapEntry> {
        self.index_with(urls::pages_sitemap_path)
    }

    /// Same as [`sitemap_index`](Self::sitemap_index), pointing at
    /// `sitemap_pages_<n>.xml` files instead of the `?n=` route.
    pub fn static_sitemap_index(&self) -> Vec<SitemapEntry> {
        self.index_with(|n| format!("/{}", urls::static_pages_sitemap_file(n)))
    }

    fn index_with(&self, page_sitemap: impl Fn(usize) -> String) -> Vec<SitemapEntry> {
        let count = page_sitemap_count(self.total_pages(), self.page_size);
        std::iter::once(self.entry(urls::CATEGORIES_SITEMAP_PATH))
            .chain((1..=count).map(|i| self.entry(&page_sitemap(i))))
            .collect()
    }

    /// Number of `(category, page)` pairs in the catalog.
    pub fn total_pages(&self) -> usize {
        self.page_paths().count()
    }

    /// Lazily enumerate page paths; records without a non-blank id cannot be
    /// linked and are skipped.
    fn page_paths(&self) -> impl Iterator<Item = String> + '_ {
        self.resolver
            .catalog()
            .list_categories_sorted()
            .iter()
            .flat_map(move |c| {
                self.resolver
                    .pages_for(&c.id)
                    .into_iter()
                    .filter_map(move |p| p.linkable_id().map(|id| urls::page_path(id, &c.id)))
            })
    }
}

/// Serialize entries as a `<urlset>` document.
pub fn render_urlset(entries: &[SitemapEntry]) -> io::Result<String> {
    render("urlset", "url", entries)
}

/// Serialize entries as a `<sitemapindex>` document.
pub fn render_sitemap_index(entries: &[SitemapEntry]) -> io::Result<String> {
    render("sitemapindex", "sitemap", entries)
}

fn render(root: &str, item: &str, entries: &[SitemapEntry]) -> io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut start = BytesStart::new(root);
    start.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(start))?;

    for entry in entries {
        let lastmod = entry.lastmod.format("%Y-%m-%d").to_string();
        writer.write_event(Event::Start(BytesStart::new(item)))?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        write_text_element(&mut writer, "lastmod", &lastmod)?;
        writer.write_event(Event::End(BytesEnd::new(item)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(root)))?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(io::Error::other)?;
    xml.push('\n');
    Ok(xml)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
