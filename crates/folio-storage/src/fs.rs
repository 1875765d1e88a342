//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading catalog resources from a data directory:
//!
//! ```text
//! {data_dir}/
//! +-- pages.json              # ResourceKey::Index
//! +-- categories/
//!     +-- animals.json        # ResourceKey::Category("animals")
//!     +-- animals/            # images referenced by bare file name
//! ```

use std::fs;
use std::path::PathBuf;

use crate::key::{ResourceKey, is_valid_slug};
use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default index file name.
const DEFAULT_INDEX_FILE: &str = "pages.json";

/// Default directory holding one JSON file per category.
const DEFAULT_CATEGORIES_DIR: &str = "categories";

/// Filesystem storage implementation.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use folio_storage::{FsStorage, ResourceKey, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("data"));
/// let raw = storage.read(&ResourceKey::category("animals"))?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root data directory.
    data_dir: PathBuf,
    /// Index file name, relative to `data_dir`.
    index_file: String,
    /// Category directory, relative to `data_dir`.
    categories_dir: String,
}

impl FsStorage {
    /// Create a filesystem storage with the default layout.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self::with_layout(data_dir, DEFAULT_INDEX_FILE, DEFAULT_CATEGORIES_DIR)
    }

    /// Create a filesystem storage with custom index file and category directory names.
    #[must_use]
    pub fn with_layout(
        data_dir: PathBuf,
        index_file: impl Into<String>,
        categories_dir: impl Into<String>,
    ) -> Self {
        Self {
            data_dir,
            index_file: index_file.into(),
            categories_dir: categories_dir.into(),
        }
    }

    /// Map a resource key to its file path.
    ///
    /// Category ids must be valid slugs so a key can never escape the
    /// category directory.
    fn resolve(&self, key: &ResourceKey) -> Result<PathBuf, StorageError> {
        match key {
            ResourceKey::Index => Ok(self.data_dir.join(&self.index_file)),
            ResourceKey::Category(id) if is_valid_slug(id) => Ok(self
                .data_dir
                .join(&self.categories_dir)
                .join(format!("{id}.json"))),
            ResourceKey::Category(_) => Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(key.to_string())
                .with_backend(BACKEND)),
        }
    }
}

impl Storage for FsStorage {
    fn read(&self, key: &ResourceKey) -> Result<String, StorageError> {
        let path = self.resolve(key)?;
        fs::read_to_string(&path)
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn exists(&self, key: &ResourceKey) -> bool {
        self.resolve(key).is_ok_and(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("categories")).unwrap();
        dir
    }

    #[test]
    fn test_fs_storage_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FsStorage>();
    }

    #[test]
    fn test_read_index() {
        let dir = create_data_dir();
        fs::write(dir.path().join("pages.json"), r#"{"site":{}}"#).unwrap();
        let storage = FsStorage::new(dir.path().to_path_buf());

        let raw = storage.read(&ResourceKey::Index).unwrap();

        assert_eq!(raw, r#"{"site":{}}"#);
    }

    #[test]
    fn test_read_category() {
        let dir = create_data_dir();
        fs::write(
            dir.path().join("categories/animals.json"),
            r#"{"pages":[]}"#,
        )
        .unwrap();
        let storage = FsStorage::new(dir.path().to_path_buf());

        let raw = storage.read(&ResourceKey::category("animals")).unwrap();

        assert_eq!(raw, r#"{"pages":[]}"#);
    }

    #[test]
    fn test_read_custom_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("cats")).unwrap();
        fs::write(dir.path().join("site.json"), "{}").unwrap();
        fs::write(dir.path().join("cats/sea.json"), "{}").unwrap();
        let storage = FsStorage::with_layout(dir.path().to_path_buf(), "site.json", "cats");

        assert!(storage.exists(&ResourceKey::Index));
        assert!(storage.exists(&ResourceKey::category("sea")));
    }

    #[test]
    fn test_read_missing_category() {
        let dir = create_data_dir();
        let storage = FsStorage::new(dir.path().to_path_buf());

        let err = storage.read(&ResourceKey::category("missing")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
        assert_eq!(
            err.path,
            Some(dir.path().join("categories").join("missing.json"))
        );
    }

    #[test]
    fn test_read_rejects_traversal() {
        let dir = create_data_dir();
        let storage = FsStorage::new(dir.path().to_path_buf());

        let err = storage
            .read(&ResourceKey::category("../pages"))
            .unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists_false_for_directory() {
        let dir = create_data_dir();
        fs::create_dir_all(dir.path().join("categories/animals.json")).unwrap();
        let storage = FsStorage::new(dir.path().to_path_buf());

        assert!(!storage.exists(&ResourceKey::category("animals")));
        assert!(!storage.exists(&ResourceKey::Index));
    }
}
