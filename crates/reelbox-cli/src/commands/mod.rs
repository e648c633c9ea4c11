pub mod auth;
pub mod config;
pub mod items;
pub mod movies;
pub mod profile;
pub mod prompts;
pub mod watchlists;

use crate::navigator::CliNavigator;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use reelbox_client::{ApiClient, ApiError, Session};
use reelbox_config::{Config, PathManager};
use std::sync::Arc;

/// Everything a command needs to talk to the backend.
pub struct Context {
    pub config: Config,
    pub client: ApiClient,
}

impl Context {
    pub fn load() -> Result<Self> {
        let path_manager = PathManager::default();
        path_manager
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create config directory: {}", e))?;

        let config_file = path_manager.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {:#}", config_file.display(), e))?;

        let session = Session::from_file(path_manager.credentials_file());
        let client = ApiClient::new(&config.api, session, Arc::new(CliNavigator::new()))
            .map_err(|e| eyre!("Failed to create API client: {}", e))?;

        tracing::debug!(base_url = %client.base_url(), "Client ready");
        Ok(Self { config, client })
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }
}

/// Turn a client error into a user-facing message. 401s already redirected,
/// so they only need a short note.
pub fn report(action: &str, err: ApiError) -> color_eyre::Report {
    match &err {
        ApiError::NotLoggedIn => eyre!("{}: you are not signed in. Run `reelbox login` first.", action),
        e if e.is_unauthorized() => eyre!("{}: session expired", action),
        e if e.is_not_found() => eyre!("{}: not found", action),
        ApiError::Status { body: Some(body), .. } => eyre!("{}: {}", action, body),
        _ => eyre!("{}: {}", action, err),
    }
}
