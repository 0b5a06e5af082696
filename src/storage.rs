//! Cart storage

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

use crate::items::LineItem;

/// Key under which the cart record is persisted.
pub const STORAGE_KEY: &str = "cart";

/// Errors raised by cart storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The stored record could not be parsed as a cart.
    #[error("malformed cart record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The backing file could not be read or written.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Durable key-value storage for the serialized cart record.
///
/// `load` returns `Ok(None)` when no record exists. The store treats every
/// load error as an absent record and falls open to an empty cart, so
/// implementations report errors faithfully rather than masking them.
pub trait CartStorage {
    /// Read and deserialize the persisted record, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the record exists but cannot be read
    /// or parsed.
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError>;

    /// Serialize and write the full record, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when serialization or the write fails.
    fn save(&mut self, lines: &[LineItem]) -> Result<(), StorageError>;
}

/// In-memory storage holding the serialized record; for tests and headless
/// use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Option<String>,
}

impl MemoryStorage {
    /// Create empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed storage with a raw serialized record.
    #[must_use]
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }

    /// The raw serialized record, if any.
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError> {
        match &self.record {
            Some(record) => Ok(Some(serde_json::from_str(record)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, lines: &[LineItem]) -> Result<(), StorageError> {
        self.record = Some(serde_json::to_string(lines)?);
        Ok(())
    }
}

/// File-backed storage: one JSON document, replaced atomically on save so a
/// crash mid-write never corrupts the record.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage rooted in the given directory; the record lives at
    /// `<dir>/<STORAGE_KEY>.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<LineItem>>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no cart record on disk");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&mut self, lines: &[LineItem]) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(lines)?;
        let staging = self.path.with_extension("json.tmp");

        fs::write(&staging, serialized)?;
        fs::rename(&staging, &self.path)?;

        Ok(())
    }
}
