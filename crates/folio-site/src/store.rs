//! Request-scoped JSON document store.
//!
//! [`JsonStore`] turns raw [`Storage`] text into parsed, shape-checked JSON
//! documents. Each request creates its own store; successful loads are
//! memoized for the lifetime of that store so a category read by several
//! components is parsed once.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use folio_storage::{ResourceKey, Storage, StorageError, StorageErrorKind};
use serde_json::Value;

/// Error returned when a resource cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Resource does not exist.
    #[error("Resource not found: {0}")]
    NotFound(ResourceKey),
    /// Resource exists but cannot be read.
    #[error("Failed to read {key}: {source}")]
    Read {
        /// Resource that failed.
        key: ResourceKey,
        /// Underlying storage error.
        #[source]
        source: StorageError,
    },
    /// Content is not valid JSON.
    #[error("Invalid JSON in {key}: {source}")]
    Parse {
        /// Resource that failed.
        key: ResourceKey,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// Content is JSON but lacks the required top-level shape.
    #[error("Invalid schema in {key}: {message}")]
    Schema {
        /// Resource that failed.
        key: ResourceKey,
        /// What was expected.
        message: &'static str,
    },
}

impl StoreError {
    /// Whether the resource simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Parsed-document store with per-request memoization.
pub struct JsonStore {
    storage: Arc<dyn Storage>,
    memo: RefCell<HashMap<ResourceKey, Rc<Value>>>,
}

impl JsonStore {
    /// Create an empty store over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            memo: RefCell::new(HashMap::new()),
        }
    }

    /// Load, parse and shape-check a resource.
    ///
    /// Failures are not memoized.
    pub fn load(&self, key: &ResourceKey) -> Result<Rc<Value>, StoreError> {
        if let Some(doc) = self.memo.borrow().get(key) {
            tracing::debug!(resource = %key, "Memoized resource hit");
            return Ok(Rc::clone(doc));
        }

        let raw = self.storage.read(key).map_err(|source| {
            if source.kind == StorageErrorKind::NotFound {
                StoreError::NotFound(key.clone())
            } else {
                StoreError::Read {
                    key: key.clone(),
                    source,
                }
            }
        })?;

        let doc: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            key: key.clone(),
            source,
        })?;
        check_shape(key, &doc)?;

        let doc = Rc::new(doc);
        self.memo.borrow_mut().insert(key.clone(), Rc::clone(&doc));
        Ok(doc)
    }
}

/// Check the top-level shape required for each resource kind.
fn check_shape(key: &ResourceKey, doc: &Value) -> Result<(), StoreError> {
    let message = match key {
        ResourceKey::Index if !doc.is_object() => "index must be an object",
        ResourceKey::Category(_) if !doc.get("pages").is_some_and(Value::is_array) => {
            "category must contain a \"pages\" array"
        }
        _ => return Ok(()),
    };
    Err(StoreError::Schema {
        key: key.clone(),
        message,
    })
}
