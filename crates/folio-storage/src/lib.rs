//! Storage abstraction for Folio catalog data.
//!
//! This crate provides a [`Storage`] trait for reading the raw JSON resources a
//! catalog is built from. Two kinds of resources exist, addressed by
//! [`ResourceKey`]:
//!
//! - [`ResourceKey::Index`] - the site index (site fields plus category list)
//! - [`ResourceKey::Category`] - one category's ordered page list
//!
//! Parsing and validation happen one layer up (`folio-site`); storage only
//! returns text or a [`StorageError`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_storage::{FsStorage, ResourceKey, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("data"));
//! let raw = storage.read(&ResourceKey::Index)?;
//! ```

mod fs;
mod key;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
pub use key::{ResourceKey, is_valid_slug};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
