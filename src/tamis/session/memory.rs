use std::collections::HashMap;

use super::SessionStore;
use crate::error::Result;

/// In-memory session store for tests and embedding. `flush` is a no-op apart
/// from counting, so tests can assert the durable flush happened.
#[derive(Debug, Default)]
pub struct MemorySession {
    entries: HashMap<String, String>,
    flushes: usize,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a slot, bypassing `put`/`flush`. Test helper.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn forget(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
