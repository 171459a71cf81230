use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::SessionStore;
use crate::error::{Result, TamisError};

/// File-backed session store: a flat string map persisted as a JSON file.
///
/// All reads and writes go through an in-memory copy; `flush` writes the file.
/// Intended for hosts without a native session backend (CLIs, local demos).
pub struct FileSession {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileSession {
    /// Opens the session file, loading existing entries if the file exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(TamisError::Io)?;
            serde_json::from_str(&content).map_err(TamisError::Serialization)?
        } else {
            HashMap::new()
        };

        Ok(Self { path, entries })
    }
}

impl SessionStore for FileSession {
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
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(TamisError::Io)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.entries).map_err(TamisError::Serialization)?;
        fs::write(&self.path, content).map_err(TamisError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let session = FileSession::open(dir.path().join("session.json")).unwrap();
        assert_eq!(session.get("anything"), None);
    }

    #[test]
    fn entries_survive_flush_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = FileSession::open(&path).unwrap();
        session.put("_sharp_retained_filter_status", "active");
        session.flush().unwrap();

        let reopened = FileSession::open(&path).unwrap();
        assert_eq!(
            reopened.get("_sharp_retained_filter_status"),
            Some("active".to_string())
        );
    }

    #[test]
    fn unflushed_writes_are_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = FileSession::open(&path).unwrap();
        session.put("k", "v");
        drop(session);

        let reopened = FileSession::open(&path).unwrap();
        assert_eq!(reopened.get("k"), None);
    }

    #[test]
    fn forget_then_flush_removes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = FileSession::open(&path).unwrap();
        session.put("k", "v");
        session.flush().unwrap();
        session.forget("k");
        session.flush().unwrap();

        let reopened = FileSession::open(&path).unwrap();
        assert_eq!(reopened.get("k"), None);
    }
}
