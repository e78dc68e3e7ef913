//! Durable slice storage, hydration and write-back.
//!
//! The store is a plain string-key → JSON-text map. Each slice of the
//! aggregate lives under its own key and is read, decoded and written
//! independently, so one damaged slice never blocks the others.

mod file;
mod hydrate;
mod memory;
mod sync;

use std::path::PathBuf;

use thiserror::Error;

pub use file::JsonFileStore;
pub use hydrate::{hydrate, FallbackReason, HydrationReport, SliceFallback};
pub use memory::MemoryStore;
pub use sync::{sync, write_all, SyncReport};

/// Errors raised by store adapters. They never cross into the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read slice '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write slice '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock store at '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode slice '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store is unavailable: {message}")]
    Unavailable { message: String },
}

/// String-key → JSON-value storage with independent per-key access.
pub trait SliceStore {
    /// Raw JSON text stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Durably store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: SliceStore + ?Sized> SliceStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
