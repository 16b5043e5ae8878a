//! Durable credential storage.
//!
//! Holds the three values that survive a restart: the bearer credential,
//! the user id, and the admin flag. Everything else the dashboard knows is
//! ephemeral loader state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StoreError;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_ID_KEY: &str = "user_id";
pub const IS_ADMIN_KEY: &str = "is_admin";

/// Key/value store for session values.
///
/// Implementations must not cache reads: callers rely on `get` observing a
/// value another process wrote since the last call.
pub trait CredentialStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process store. Used by tests and by embedders that manage their own
/// persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// The file is re-read on every `get`, so a credential rotated by another
/// process is picked up by the next request. Writes go through a temporary
/// file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let body = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Typed view over the session keys of a [`CredentialStore`].
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.store)
    }

    /// Persists a freshly issued credential together with the user context.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if any value cannot be written.
    pub fn sign_in(&self, token: &str, user_id: &str, is_admin: bool) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, token)?;
        self.store.set(USER_ID_KEY, user_id)?;
        if is_admin {
            self.store.set(IS_ADMIN_KEY, "true")
        } else {
            self.store.remove(IS_ADMIN_KEY)
        }
    }

    /// Clears the credential, the user id, and the admin flag together.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if any value cannot be removed.
    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(USER_ID_KEY)?;
        self.store.remove(IS_ADMIN_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    pub fn access_token(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .store
            .get(ACCESS_TOKEN_KEY)?
            .filter(|t| !t.is_empty()))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    pub fn user_id(&self) -> Result<Option<String>, StoreError> {
        Ok(self.store.get(USER_ID_KEY)?.filter(|id| !id.is_empty()))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be read.
    pub fn is_admin(&self) -> Result<bool, StoreError> {
        Ok(self
            .store
            .get(IS_ADMIN_KEY)?
            .is_some_and(|v| v.eq_ignore_ascii_case("true")))
    }
}
