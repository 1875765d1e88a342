//! Identifier sanitization.

/// Strip every character outside `[A-Za-z0-9_-]`.
///
/// Applied to every externally supplied identifier (category id, page id)
/// before it is used as a storage key or placed in a URL. Never fails; the
/// worst case is an empty string, which callers treat as "absent".
#[must_use]
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Sanitize an optional parameter, mapping empty results to `None`.
#[must_use]
pub fn sanitize_param(raw: Option<&str>) -> Option<String> {
    raw.map(sanitize).filter(|s| !s.is_empty())
}
