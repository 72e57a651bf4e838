//! Durable persistence for the cart snapshot.
//!
//! The cart and wishlist are stored as a single serialized blob under one
//! storage key, read once at engine construction and overwritten wholesale
//! on every mutation (not append-only). Writes are best-effort durability:
//! the in-memory state stays authoritative for the session, and the engine
//! only logs a failed write.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use thiserror::Error;

use shophub_core::CartSnapshot;

/// Storage key for the cart/wishlist blob.
pub const STORAGE_KEY: &str = "cart-storage";

/// Errors from loading or saving the snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The stored blob could not be decoded, or the snapshot could not be
    /// encoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable store for the cart snapshot.
///
/// The engine is generic over this trait so tests can substitute an
/// in-memory store.
pub trait SnapshotStore {
    /// Load the stored snapshot, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the blob exists but cannot be read or decoded.
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError>;

    /// Overwrite the stored snapshot wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the blob cannot be encoded or written.
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
        (**self).load()
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}

/// File-backed store writing one JSON blob named after [`STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a store rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Path of the blob file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn blob_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError> {
        let dir = self.blob_dir();
        fs::create_dir_all(dir)?;

        let bytes = serde_json::to_vec(snapshot)?;

        // Write to a temp file in the same directory, then rename over the
        // blob. A crashed write must never leave a torn snapshot.
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        temp.persist(&self.path)
            .map_err(|err| StoreError::Io(err.error))?;
        Ok(())
    }
}
