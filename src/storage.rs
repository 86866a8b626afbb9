//! Board file persistence.
//!
//! One invocation is one locked read(-modify-write) cycle:
//!
//! 1. Acquire the exclusive lock on `<file>.lock`
//! 2. Read and decode the whole file (missing file = empty board)
//! 3. Apply at most one mutation in memory
//! 4. Encode and atomically replace the file, only if the mutation succeeded
//! 5. Release the lock (on drop)
//!
//! While the board file does not exist nothing is locked or created: reads
//! see the empty board, and a mutation is first tried against it so that a
//! failing command leaves the directory untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec;
use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::model::Document;

/// Handle on one board file.
#[derive(Debug, Clone)]
pub struct BoardFile {
    path: PathBuf,
    lock_timeout_ms: u64,
}

impl BoardFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        lock::lock_path_for(&self.path)
    }

    /// Read the current document under the lock.
    pub fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "board file missing, starting empty");
            return Ok(Document::default());
        }
        let _lock = FileLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        self.read_unlocked()
    }

    /// Load, apply `mutate`, and save, all under one lock.
    ///
    /// Nothing is written when `mutate` returns an error. `mutate` may run
    /// twice when the file is missing; only the locked run is saved.
    pub fn update<T, F>(&self, mut mutate: F) -> Result<T>
    where
        F: FnMut(&mut Document) -> Result<T>,
    {
        if !self.path.exists() {
            mutate(&mut Document::default())?;
        }
        let _lock = FileLock::acquire(self.lock_path(), self.lock_timeout_ms)?;
        let mut doc = self.read_unlocked()?;
        let value = mutate(&mut doc)?;
        let text = codec::encode(&doc);
        lock::write_atomic_str(&self.path, &text)?;
        debug!(
            path = %self.path.display(),
            items = doc.items.len(),
            bytes = text.len(),
            "board saved"
        );
        Ok(value)
    }

    fn read_unlocked(&self) -> Result<Document> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "board file missing, starting empty");
                return Ok(Document::default());
            }
            Err(err) => return Err(Error::Io(err)),
        };
        let text = String::from_utf8(bytes).map_err(|_| Error::InvalidData(self.path.clone()))?;
        let doc = codec::decode(&text);
        debug!(
            path = %self.path.display(),
            items = doc.items.len(),
            boards = doc.boards().len(),
            "board loaded"
        );
        Ok(doc)
    }
}
