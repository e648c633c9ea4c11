use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use reelbox_models::{Watchlist, WatchlistRequest};

pub struct Watchlists<'a> {
    client: &'a ApiClient,
}

impl<'a> Watchlists<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Every watchlist the backend exposes, regardless of owner.
    pub async fn list_all(&self) -> Result<Vec<Watchlist>, ApiError> {
        self.client.get(endpoints::watchlists::get_all()).await
    }

    pub async fn list_for(&self, user_id: &str) -> Result<Vec<Watchlist>, ApiError> {
        self.client.get(&endpoints::watchlists::get_by_user(user_id)).await
    }

    pub async fn list_mine(&self) -> Result<Vec<Watchlist>, ApiError> {
        let user_id = self.client.require_user_id().await?;
        self.list_for(&user_id).await
    }

    pub async fn get(&self, id: i64) -> Result<Watchlist, ApiError> {
        self.client.get(&endpoints::watchlists::get_by_id(id)).await
    }

    /// Create a watchlist owned by the logged-in user.
    pub async fn create(&self, name: &str, description: &str) -> Result<Watchlist, ApiError> {
        let user_id = self.client.require_user_id().await?;
        let body = WatchlistRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        self.client.post(&endpoints::watchlists::create(&user_id), &body).await
    }

    pub async fn update(&self, id: i64, name: &str, description: &str) -> Result<Watchlist, ApiError> {
        let body = WatchlistRequest {
            name: name.to_string(),
            description: description.to_string(),
        };
        self.client.put(&endpoints::watchlists::update(id), &body).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&endpoints::watchlists::delete(id)).await
    }
}
