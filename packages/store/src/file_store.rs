//! # Filesystem-backed key/value store
//!
//! [`FileStore`] persists each key as its own small file so that a desktop or
//! mobile build keeps the session across restarts, the way a browser keeps
//! `localStorage`.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── ma_token          # raw bearer token
//! ├── ma_user           # JSON identity record
//! └── ma%3Atheme        # theme preference
//! ```
//!
//! Key characters outside `[A-Za-z0-9_-.]` are percent-encoded so keys such
//! as `ma:theme` map to valid file names on every platform.
//!
//! Use [`dirs::data_dir()`](https://docs.rs/dirs) to obtain a platform
//! appropriate base directory.

use std::path::PathBuf;

use crate::kv::{KeyValueStore, StorageError};

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(encode_key(key))
    }
}

fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
