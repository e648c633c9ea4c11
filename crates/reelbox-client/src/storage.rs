use async_trait::async_trait;
use reelbox_config::{CredentialError, CredentialStore};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value storage for the session pair.
///
/// Single-key operations are individually atomic. The multi-key operations
/// must leave either all or none of the keys written; the default
/// implementations roll back on a partial `set_many` and keep going on a
/// failed `remove_many` so no key is left behind by an early error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (written, (key, value)) in entries.iter().enumerate() {
            if let Err(e) = self.set(key, value).await {
                for (key, _) in &entries[..written] {
                    let _ = self.remove(key).await;
                }
                return Err(e);
            }
        }
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in keys {
            if let Err(e) = self.remove(key).await {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Process-local store; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<T, StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }

    async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        self.with_entries(|entries| {
            for (key, value) in pairs {
                entries.insert(key.to_string(), value.to_string());
            }
        })
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.with_entries(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}

/// Store backed by the credentials TOML file.
///
/// Every operation reloads the file first so a logout performed by another
/// process is observed. Multi-key writes are a single file write.
pub struct FileStore {
    inner: tokio::sync::Mutex<CredentialStore>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            inner: tokio::sync::Mutex::new(CredentialStore::new(path)),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut store = self.inner.lock().await;
        store.load()?;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_many(&[(key, value)]).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_many(&[key]).await
    }

    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut store = self.inner.lock().await;
        store.load()?;
        for (key, value) in entries {
            store.set(key.to_string(), value.to_string());
        }
        store.save()?;
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut store = self.inner.lock().await;
        store.load()?;
        if keys.iter().all(|key| store.get(key).is_none()) {
            return Ok(());
        }
        for key in keys {
            store.remove(key);
        }
        store.save()?;
        Ok(())
    }
}
