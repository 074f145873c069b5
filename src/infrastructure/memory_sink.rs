use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{error::StorageError, persistence::PersistenceSink};

/// Process-local slot map. Clones share the same storage, so a test can keep a handle
/// after moving one into a store.
#[derive(Clone, Default)]
pub struct MemorySink {
    items: Arc<Mutex<HashMap<String, String>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }

    pub fn with_value(key: &str, value: &str) -> Self {
        let sink = Self::default();
        sink.lock().insert(key.to_string(), value.to_string());
        sink
    }

    /// Current value without counting as a read.
    pub fn peek(&self, key: &str) -> Option<String> { self.lock().get(key).cloned() }

    pub fn reads(&self) -> usize { self.reads.load(Ordering::SeqCst) }

    pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // a poisoned map is still a valid map
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PersistenceSink for MemorySink {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
