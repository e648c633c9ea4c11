pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApiConfig, Config, MoviesConfig, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_CONTENT_TYPE};
pub use credentials::{CredentialError, CredentialStore, TOKEN_KEY, USER_ID_KEY};
pub use paths::{PathManager, container_base_path};
