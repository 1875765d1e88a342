//! Catalog data model.
//!
//! Records are extracted field by field from parsed JSON so that one malformed
//! field never rejects a whole document: a missing or non-string field is
//! simply absent.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::image::normalize_image_path;

/// Read a string field from a JSON object.
fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Site-level fields from the index.
///
/// Missing fields are empty strings so nothing absent reaches rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Homepage heading (before count prefixing).
    pub h1: String,
    /// Default description.
    pub description: String,
    /// Absolute base URL (e.g. `https://example.com`), if present.
    pub base_url: Option<String>,
}

impl SiteConfig {
    /// Extract site fields from the index document's `site` object.
    #[must_use]
    pub fn from_index(index: &Value) -> Self {
        let Some(site) = index.get("site").and_then(Value::as_object) else {
            return Self::default();
        };
        Self {
            title: string_field(site, "title").unwrap_or_default(),
            h1: string_field(site, "h1").unwrap_or_default(),
            description: string_field(site, "description").unwrap_or_default(),
            base_url: string_field(site, "baseUrl").filter(|u| !u.trim().is_empty()),
        }
    }
}

/// A category from the site index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Unique slug.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

impl Category {
    /// Build a category from an index entry.
    ///
    /// Returns `None` for entries that are not objects or have no non-empty
    /// string `id`; such entries cannot be addressed and are skipped.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = string_field(obj, "id").filter(|id| !id.is_empty())?;
        Some(Self {
            id,
            name: string_field(obj, "name").unwrap_or_default(),
            description: string_field(obj, "description"),
        })
    }
}

/// A page record exactly as stored in a category's page list.
///
/// Any field may be missing; see [`PageRecord::complete`] for the display
/// check applied before rendering a record in a grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRecord {
    /// Page slug, unique within its category.
    pub id: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Image path or absolute URL (normalized, see [`normalize_image_path`]).
    pub image: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

impl PageRecord {
    /// Build a record from a page list entry owned by `category_id`.
    #[must_use]
    pub fn from_value(value: &Value, category_id: &str) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            id: string_field(obj, "id"),
            title: string_field(obj, "title"),
            image: string_field(obj, "image").map(|img| normalize_image_path(category_id, &img)),
            description: string_field(obj, "description"),
        }
    }

    /// Whether this record's id equals `id`.
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Id usable in a link; blank ids cannot be resolved and count as absent.
    #[must_use]
    pub fn linkable_id(&self) -> Option<&str> {
        non_blank(self.id.as_ref())
    }

    /// The record as a displayable page, if `id`, `title` and `image` are all
    /// present and not blank.
    #[must_use]
    pub fn complete(&self) -> Option<Page> {
        Some(Page {
            id: self.linkable_id()?.to_owned(),
            title: non_blank(self.title.as_ref())?.to_owned(),
            image: non_blank(self.image.as_ref())?.to_owned(),
            description: self.description.clone(),
        })
    }
}

/// A page with every display field present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Page slug.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Image path or absolute URL.
    pub image: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Page {
    /// Enrich with the owning category for rendering.
    #[must_use]
    pub fn into_grid_item(self, category: &str) -> GridItem {
        GridItem {
            id: self.id,
            title: self.title,
            image: self.image,
            category: category.to_owned(),
        }
    }
}

/// A page enriched with its owning category id, used only for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GridItem {
    /// Page slug.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Image path or absolute URL.
    pub image: String,
    /// Owning category id.
    pub category: String,
}
