//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use reelbox_client::{ApiClient, KeyValueStore, Navigator, Route, Session, StorageError};
use reelbox_config::ApiConfig;
use reelbox_models::Credentials;
use std::sync::{Arc, Mutex};

/// Records every replace so tests can count redirects.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Storage whose reads always fail.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("device storage offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("device storage offline".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("device storage offline".to_string()))
    }
}

pub struct Harness {
    pub client: ApiClient,
    pub session: Session,
    pub navigator: Arc<RecordingNavigator>,
}

/// Client pointed at `<mock server>/api`, sharing an in-memory session.
pub fn harness(server_uri: &str) -> Harness {
    harness_with_session(server_uri, Session::in_memory())
}

pub fn harness_with_session(server_uri: &str, session: Session) -> Harness {
    let navigator = Arc::new(RecordingNavigator::default());
    let config = ApiConfig {
        base_url: format!("{}/api", server_uri),
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config, session.clone(), navigator.clone()).expect("Failed to create client");
    Harness {
        client,
        session,
        navigator,
    }
}

pub async fn log_in(session: &Session, token: &str, user_id: &str) {
    session
        .establish(&Credentials {
            token: token.to_string(),
            user_id: user_id.to_string(),
        })
        .await
        .expect("Failed to store credentials");
}
