//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::key::ResourceKey;
use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores resources in memory. Use the builder methods to configure the mock
/// with test data.
///
/// # Example
///
/// ```ignore
/// use folio_storage::{MockStorage, ResourceKey, Storage};
///
/// let storage = MockStorage::new()
///     .with_index(r#"{"site":{},"categories":[]}"#)
///     .with_category("animals", r#"{"pages":[]}"#);
///
/// let raw = storage.read(&ResourceKey::Index).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    contents: RwLock<HashMap<ResourceKey, String>>,
    unreadable: RwLock<HashSet<ResourceKey>>,
    reads: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw site index.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_index(self, content: impl Into<String>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(ResourceKey::Index, content.into());
        self
    }

    /// Set the raw page list of a category.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_category(self, id: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(ResourceKey::category(id), content.into());
        self
    }

    /// Make a resource fail with a permission error on read.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, key: ResourceKey) -> Self {
        self.unreadable.write().unwrap().insert(key);
        self
    }

    /// Number of `read` calls served so far, including failed ones.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl Storage for MockStorage {
    fn read(&self, key: &ResourceKey) -> Result<String, StorageError> {
        self.reads.fetch_add(1, Ordering::Relaxed);

        if self.unreadable.read().unwrap().contains(key) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(key.to_string())
                .with_backend("Mock"));
        }

        self.contents
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound)
                    .with_path(key.to_string())
                    .with_backend("Mock")
            })
    }

    fn exists(&self, key: &ResourceKey) -> bool {
        self.contents.read().unwrap().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_storage_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockStorage>();
    }

    #[test]
    fn test_new_empty() {
        let storage = MockStorage::new();

        assert!(!storage.exists(&ResourceKey::Index));
        let err = storage.read(&ResourceKey::Index).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_with_index_and_category() {
        let storage = MockStorage::new()
            .with_index("{}")
            .with_category("animals", r#"{"pages":[]}"#);

        assert_eq!(storage.read(&ResourceKey::Index).unwrap(), "{}");
        assert_eq!(
            storage.read(&ResourceKey::category("animals")).unwrap(),
            r#"{"pages":[]}"#
        );
    }

    #[test]
    fn test_with_unreadable() {
        let storage = MockStorage::new()
            .with_category("animals", "{}")
            .with_unreadable(ResourceKey::category("animals"));

        let err = storage.read(&ResourceKey::category("animals")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_read_count() {
        let storage = MockStorage::new().with_index("{}");

        let _ = storage.read(&ResourceKey::Index);
        let _ = storage.read(&ResourceKey::category("missing"));

        assert_eq!(storage.read_count(), 2);
    }
}
