//! Whitelisted slice persistence.
//!
//! Each store may nominate a small slice of its state to survive process
//! restart — browsing intent like filters and preferences like the theme.
//! Entity collections and in-flight flags never persist; they are re-fetched
//! fresh so no session ever renders stale cached data.
//!
//! Writes are synchronous and last-writer-wins; no cross-process
//! coordination is attempted.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from a persistence backend.
#[derive(Error, Debug)]
pub enum PersistError {
    /// The backing storage failed.
    #[error("Persistence I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The slice could not be serialized or deserialized.
    #[error("Persistence serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A keyed blob store for persisted slices.
///
/// Implementations must be cheap enough to call after every action; the
/// slices are a handful of small fields.
pub trait SlicePersistence: Send + Sync {
    /// Write the blob stored under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] when the backing storage fails.
    fn save(&self, key: &str, json: &str) -> Result<(), PersistError>;

    /// Read the blob stored under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] when the backing storage fails.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;
}

/// State types that nominate a persisted slice.
pub trait PersistedState {
    /// The whitelisted slice. Everything outside it is session-transient.
    type Slice: Serialize + DeserializeOwned;

    /// Storage key for the slice.
    const KEY: &'static str;

    /// Extract the slice from the current state.
    fn capture(&self) -> Self::Slice;

    /// Merge a previously-persisted slice back into the state.
    fn restore(&mut self, slice: Self::Slice);
}

/// Serialize and save the whitelisted slice of `state`.
///
/// # Errors
///
/// Returns [`PersistError`] when serialization or the backend fails.
pub fn save_slice<S: PersistedState>(
    backend: &dyn SlicePersistence,
    state: &S,
) -> Result<(), PersistError> {
    let json = serde_json::to_string(&state.capture())?;
    backend.save(S::KEY, &json)
}

/// Load and restore the persisted slice into `state`, if one exists.
///
/// Returns whether a slice was found.
///
/// # Errors
///
/// Returns [`PersistError`] when the backend fails or the stored blob does
/// not deserialize (e.g. written by an incompatible version).
pub fn load_slice<S: PersistedState>(
    backend: &dyn SlicePersistence,
    state: &mut S,
) -> Result<bool, PersistError> {
    match backend.load(S::KEY)? {
        Some(json) => {
            state.restore(serde_json::from_str(&json)?);
            Ok(true)
        },
        None => Ok(false),
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySliceStore {
    blobs: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemorySliceStore {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw blob stored under `key`, for assertions.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        match self.blobs.lock() {
            Ok(blobs) => blobs.get(key).cloned(),
            Err(_) => None,
        }
    }
}

impl SlicePersistence for MemorySliceStore {
    fn save(&self, key: &str, json: &str) -> Result<(), PersistError> {
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.insert(key.to_owned(), json.to_owned());
        }
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.blobs.lock().ok().and_then(|blobs| blobs.get(key).cloned()))
    }
}

/// File-per-key backend for native sessions.
#[derive(Debug, Clone)]
pub struct FileSliceStore {
    dir: std::path::PathBuf,
}

impl FileSliceStore {
    /// Create a backend writing under `dir`. The directory is created on
    /// first save.
    #[must_use]
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SlicePersistence for FileSliceStore {
    fn save(&self, key: &str, json: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), json)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}
