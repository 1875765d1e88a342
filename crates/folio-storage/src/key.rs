//! Resource addressing.
//!
//! A catalog consists of exactly one site index and one page list per
//! category. [`ResourceKey`] names one of them; it displays as `"index"` or
//! `"category:<id>"`.

use std::fmt;

/// Prefix of the textual form of a category key.
const CATEGORY_PREFIX: &str = "category:";

/// Check whether `s` is a non-empty slug made of `[A-Za-z0-9_-]`.
#[must_use]
pub fn is_valid_slug(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Name of a storage resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    /// The site index.
    Index,
    /// A category's page list, keyed by its (already sanitized) id.
    Category(String),
}

impl ResourceKey {
    /// Key for a category's page list.
    #[must_use]
    pub fn category(id: impl Into<String>) -> Self {
        Self::Category(id.into())
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index => f.write_str("index"),
            Self::Category(id) => write!(f, "{CATEGORY_PREFIX}{id}"),
        }
    }
}
