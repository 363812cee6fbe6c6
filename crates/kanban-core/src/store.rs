//! Persistent Store Adapter
//!
//! Wraps an opaque string key-value store. Reads fall back, writes are
//! best-effort; no store failure ever reaches the caller.

use std::collections::HashMap;

use thiserror::Error;

/// Failure reported by a raw store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    WriteRejected(String),
}

/// Raw string key-value store (browser localStorage, in-memory, ...)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Infallible front for a [`KeyValueStore`]
#[derive(Debug, Clone, Default)]
pub struct StoreAdapter<S> {
    inner: S,
}

impl<S: KeyValueStore> StoreAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Value under `key`, or `fallback` when absent or unreadable
    pub fn get(&self, key: &str, fallback: &str) -> String {
        self.get_opt(key).unwrap_or_else(|| fallback.to_string())
    }

    pub fn get_opt(&self, key: &str) -> Option<String> {
        match self.inner.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("read of {} failed: {}", key, e);
                None
            }
        }
    }

    /// Best-effort write; failures are logged and dropped
    pub fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.inner.set(key, value) {
            log::warn!("write of {} dropped: {}", key, e);
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

/// In-memory store; can be switched into a failing mode
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects every read and write
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            failing: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Direct read that bypasses the failure switch
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing {
            return Err(StoreError::Unavailable("memory store disabled".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::WriteRejected("memory store disabled".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
