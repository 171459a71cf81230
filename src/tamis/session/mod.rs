//! # Session Layer
//!
//! Retained filter values outlive a single request by living in a session
//! store. The store is abstracted behind the [`SessionStore`] trait so it can
//! be backed by whatever the host web stack provides:
//!
//! - [`memory::MemorySession`]: in-memory store for tests and embedding
//! - [`fs::FileSession`]: JSON file on disk, written on `flush`
//!
//! Values are flat strings using the same encoding as query parameters, one
//! slot per filter:
//!
//! ```text
//! _sharp_retained_filter_<name>          per-list retained value
//! _sharp_retained_global_filter_<name>   global retained value
//! ```
//!
//! Writes are buffered until `flush`, which is the durable point: a request
//! must flush after updating retained values and before finalizing its
//! response.

use crate::error::Result;

pub mod fs;
pub mod memory;

pub const RETAINED_KEY_PREFIX: &str = "_sharp_retained_filter_";
pub const GLOBAL_KEY_PREFIX: &str = "_sharp_retained_global_filter_";

/// Session slot for a per-list retained filter value.
pub fn retained_key(name: &str) -> String {
    format!("{}{}", RETAINED_KEY_PREFIX, name)
}

/// Session slot for a global retained filter value.
pub fn global_key(name: &str) -> String {
    format!("{}{}", GLOBAL_KEY_PREFIX, name)
}

/// Key-value session capability injected into the filter value store.
///
/// Shared and externally synchronized by the host; last writer wins across
/// concurrent requests for the same session.
pub trait SessionStore {
    /// Read a slot.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a slot (buffered until `flush`).
    fn put(&mut self, key: &str, value: &str);

    /// Remove a slot (buffered until `flush`).
    fn forget(&mut self, key: &str);

    /// Durably persist all buffered writes.
    fn flush(&mut self) -> Result<()>;
}
