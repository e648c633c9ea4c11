use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use reelbox_config::{TOKEN_KEY, USER_ID_KEY};
use reelbox_models::Credentials;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// The user asked to log out.
    Logout,
    /// The backend rejected the stored token with a 401.
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Established { user_id: String },
    Invalidated { reason: InvalidationReason },
}

/// Shared handle on the persisted credential pair.
///
/// Cloning is cheap; clones share the store and the event channel. Reads go
/// straight to storage on every call, so an in-flight request keeps whatever
/// token it already read even if the pair is cleared meanwhile.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self { store, events }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn from_file(path: PathBuf) -> Self {
        Self::new(Arc::new(FileStore::new(path)))
    }

    pub async fn token(&self) -> Result<Option<String>, StorageError> {
        self.store.get(TOKEN_KEY).await
    }

    pub async fn user_id(&self) -> Result<Option<String>, StorageError> {
        self.store.get(USER_ID_KEY).await
    }

    /// Both halves of the pair, or `None` if either is missing.
    pub async fn credentials(&self) -> Result<Option<Credentials>, StorageError> {
        let token = self.token().await?;
        let user_id = self.user_id().await?;
        Ok(match (token, user_id) {
            (Some(token), Some(user_id)) => Some(Credentials { token, user_id }),
            _ => None,
        })
    }

    pub async fn is_logged_in(&self) -> Result<bool, StorageError> {
        Ok(self.credentials().await?.is_some())
    }

    /// Whether either half of the pair is stored. A half pair still needs
    /// clearing: an orphan token would otherwise keep being attached.
    pub async fn has_stored_credentials(&self) -> Result<bool, StorageError> {
        Ok(self.token().await?.is_some() || self.user_id().await?.is_some())
    }

    pub async fn establish(&self, credentials: &Credentials) -> Result<(), StorageError> {
        self.store
            .set_many(&[(TOKEN_KEY, credentials.token.as_str()), (USER_ID_KEY, credentials.user_id.as_str())])
            .await?;
        debug!(user_id = %credentials.user_id, "Session established");
        let _ = self.events.send(SessionEvent::Established {
            user_id: credentials.user_id.clone(),
        });
        Ok(())
    }

    /// User-initiated logout.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.invalidate(InvalidationReason::Logout).await
    }

    /// Remove both halves of the pair and notify subscribers. Idempotent.
    pub async fn invalidate(&self, reason: InvalidationReason) -> Result<(), StorageError> {
        self.store.remove_many(&[TOKEN_KEY, USER_ID_KEY]).await?;
        debug!(?reason, "Session invalidated");
        let _ = self.events.send(SessionEvent::Invalidated { reason });
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
