use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which the session bearer token is persisted.
pub const TOKEN_KEY: &str = "token";
/// Key under which the logged-in user's identifier is persisted.
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to access credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse credentials file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize credentials: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// String key-value pairs persisted as a flat TOML file.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory contents with the file's. A missing file is empty.
    pub fn load(&mut self) -> Result<(), CredentialError> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path).map_err(|source| CredentialError::Io {
                path: self.path.clone(),
                source,
            })?;
            let creds_data: CredentialsData = toml::from_str(&content).map_err(|source| CredentialError::Parse {
                path: self.path.clone(),
                source,
            })?;
            self.credentials = creds_data.data;
        } else {
            self.credentials.clear();
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), CredentialError> {
        let io_err = |source| CredentialError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content).map_err(io_err)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_token(&self) -> Option<&String> {
        self.get(TOKEN_KEY)
    }

    pub fn get_user_id(&self) -> Option<&String> {
        self.get(USER_ID_KEY)
    }

    pub fn get_all_keys(&self) -> Vec<String> {
        self.credentials.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set(TOKEN_KEY.to_string(), "abc123".to_string());
        store.set(USER_ID_KEY.to_string(), "u1".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_token(), Some(&"abc123".to_string()));
        assert_eq!(loaded_store.get_user_id(), Some(&"u1".to_string()));
    }

    #[test]
    fn test_credential_store_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("nested").join("credentials.toml"));
        store.set("stale".to_string(), "value".to_string());
        store.load().unwrap();
        assert!(store.get_all_keys().is_empty());

        // save creates the parent directory
        store.set(TOKEN_KEY.to_string(), "t".to_string());
        store.save().unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_credential_store_rejects_garbage() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "this is = = not toml").unwrap();
        let mut store = CredentialStore::new(file.path().to_path_buf());
        assert!(matches!(store.load(), Err(CredentialError::Parse { .. })));
    }

    #[test]
    fn test_credential_store_remove() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set("key1".to_string(), "value1".to_string());
        store.set("key2".to_string(), "value2".to_string());

        assert_eq!(store.get("key1"), Some(&"value1".to_string()));
        store.remove("key1");
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.get("key2"), Some(&"value2".to_string()));
    }
}
