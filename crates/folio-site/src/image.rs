//! Image path normalization.
//!
//! Category images live next to the category file:
//!
//! ```text
//! categories/<cid>.json
//! categories/<cid>/<image-file>
//! ```
//!
//! so a page may name its image by bare file name.

use crate::slug::sanitize;

/// Resolve a page's `image` value relative to its category.
///
/// - absolute `http://` / `https://` URLs are kept
/// - values containing `/` are kept (already a path)
/// - bare file names become `categories/<cid>/<file>`
///
/// Surrounding whitespace is trimmed; an empty value stays empty.
#[must_use]
pub fn normalize_image_path(category_id: &str, image: &str) -> String {
    let image = image.trim();
    if image.is_empty() || is_absolute_url(image) || image.contains('/') {
        return image.to_owned();
    }
    format!("categories/{}/{image}", sanitize(category_id))
}

fn is_absolute_url(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_file_name_goes_under_category() {
        assert_eq!(
            normalize_image_path("minecraft", "creeper.png"),
            "categories/minecraft/creeper.png"
        );
    }

    #[test]
    fn test_paths_and_urls_are_kept() {
        assert_eq!(
            normalize_image_path("minecraft", "categories/minecraft/creeper.png"),
            "categories/minecraft/creeper.png"
        );
        assert_eq!(
            normalize_image_path("minecraft", "HTTPS://cdn.example.com/c.png"),
            "HTTPS://cdn.example.com/c.png"
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(normalize_image_path("a", "  x.png \n"), "categories/a/x.png");
        assert_eq!(normalize_image_path("a", "   "), "");
    }
}
