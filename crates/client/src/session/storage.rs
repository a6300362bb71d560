//! Persistence backends for the session record.
//!
//! The browser original kept three `localStorage` entries (access token,
//! refresh token, serialized user). Here they form one JSON record behind
//! the [`SessionStorage`] trait: [`FileStorage`] is the persistent path and
//! [`MemoryStorage`] covers environments without persistent storage (and
//! tests).

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use casita_azul_core::User;

/// Errors from reading or writing the session record.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Storage backend for the session record.
pub trait SessionStorage: Send + Sync {
    /// Load the stored record, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read or decoded.
    fn load(&self) -> Result<Option<PersistedSession>, StorageError>;

    /// Replace the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn store(&self, session: &PersistedSession) -> Result<(), StorageError>;

    /// Remove the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed storage, the `localStorage` analog.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, session: &PersistedSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(session)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory storage for non-persistent environments and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<PersistedSession>>,
}

impl MemoryStorage {
    /// Empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// In-memory storage seeded with an existing record.
    #[must_use]
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<PersistedSession>, StorageError> {
        Ok(self.slot.lock().map_or(None, |slot| slot.clone()))
    }

    fn store(&self, session: &PersistedSession) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}
