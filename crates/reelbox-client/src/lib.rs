//! Session-aware client for the movie and watchlist REST backend.
//!
//! Every call goes through an [`ApiClient`], which attaches the stored bearer
//! token and reacts to a 401 by wiping the stored session and sending the
//! user back to the login route.

pub mod api;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod navigation;
pub mod session;
pub mod storage;

pub use api::{check_new_password, PageCounter, PageRequest, RegistrationForm, ValidationError, MIN_PASSWORD_LEN};
pub use client::ApiClient;
pub use error::ApiError;
pub use middleware::{BearerAuth, Pipeline, RequestMiddleware, ResponseMiddleware, UnauthorizedRedirect};
pub use navigation::{Navigator, NoopNavigator, Route};
pub use session::{InvalidationReason, Session, SessionEvent};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
