use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{SliceStore, StoreError};

/// In-process store for tests and throwaway sessions.
///
/// Clones share the same map, so a test can keep a handle while a session
/// owns another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    write_log: Vec<String>,
    failing_keys: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `key` with raw text, bypassing the write log.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner
            .lock()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().entries.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    /// Keys in the order they were written, one entry per write.
    pub fn write_log(&self) -> Vec<String> {
        self.inner.lock().write_log.clone()
    }

    pub fn clear_write_log(&self) {
        self.inner.lock().write_log.clear();
    }

    /// Make every read and write of `key` fail until the store is dropped.
    pub fn fail_key(&self, key: &str) {
        self.inner.lock().failing_keys.push(key.to_string());
    }

    fn check(inner: &MemoryInner, key: &str) -> Result<(), StoreError> {
        if inner.failing_keys.iter().any(|k| k == key) {
            return Err(StoreError::Unavailable {
                message: format!("injected failure for '{}'", key),
            });
        }
        Ok(())
    }
}

impl SliceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.inner.lock();
        Self::check(&inner, key)?;
        Ok(inner.entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        Self::check(&inner, key)?;
        inner.entries.insert(key.to_string(), value.to_string());
        inner.write_log.push(key.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        Self::check(&inner, key)?;
        inner.entries.remove(key);
        Ok(())
    }
}
