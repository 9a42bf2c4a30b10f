//! # Ledger Store
//!
//! Key/value persistence abstraction for the ledger document.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Persistence Model                               │
//! │                                                                     │
//! │  The browser implementation kept the whole ledger as one JSON       │
//! │  string under localStorage["paymentTransactions"]. The trait below  │
//! │  is exactly that surface: get/set/remove a string by key.           │
//! │                                                                     │
//! │  PaymentSession ──► LedgerStore::set(STORAGE_KEY, serialized)       │
//! │       ▲                    │                                        │
//! │       │                    ├── MemoryStore   (tests, WASM host)     │
//! │       │                    └── FileStore     (one file per key)     │
//! │       └── LedgerStore::get(STORAGE_KEY) on startup                  │
//! │                                                                     │
//! │  Whole-document replace, exactly one writer, no partial-write or    │
//! │  crash-consistency guarantees - last write wins.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};

/// Well-known key the ledger document is persisted under.
///
/// Matches the localStorage key used by the browser implementation so the
/// two can share a migrated document.
pub const STORAGE_KEY: &str = "paymentTransactions";

// =============================================================================
// Store Trait
// =============================================================================

/// A localStorage-style string store.
///
/// Implementations persist whole documents per key; there is no notion of
/// partial updates. A missing key is `Ok(None)`, never an error.
pub trait LedgerStore {
    /// Reads the document stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the document stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the document stored under `key`. Removing a missing key
    /// is a no-op.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store. Used in tests and by hosts that manage their own
/// persistence (e.g., a WASM embedding that mirrors to localStorage).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl LedgerStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

/// File-backed store: one `<key>.json` document per key inside a directory.
///
/// ## Example
/// ```rust,ignore
/// let mut store = FileStore::new("./data")?;
/// store.set(STORAGE_KEY, "[]")?;
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(dir.display().to_string(), e))?;
        Ok(FileStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl LedgerStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            // Missing key is an empty ledger, not an error
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::write(self.path_for(key), value).map_err(|e| StoreError::io(key, e))
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}

/// Blanket impl so sessions can borrow a store instead of owning it.
impl<S: LedgerStore + ?Sized> LedgerStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
