use crate::client::ApiClient;
use crate::endpoints::watchlists::items;
use crate::error::ApiError;
use reelbox_models::{AddItemRequest, ItemStatus, UpdateItemRequest, WatchlistItem};

pub struct Items<'a> {
    client: &'a ApiClient,
}

impl<'a> Items<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, watchlist_id: i64) -> Result<Vec<WatchlistItem>, ApiError> {
        self.client.get(&items::get_all(watchlist_id)).await
    }

    pub async fn list_by_status(&self, watchlist_id: i64, status: ItemStatus) -> Result<Vec<WatchlistItem>, ApiError> {
        self.client.get(&items::get_by_status(watchlist_id, status)).await
    }

    pub async fn add(&self, watchlist_id: i64, movie_id: i64) -> Result<(), ApiError> {
        self.client
            .post_discard(&items::add(watchlist_id), &AddItemRequest { movie_id })
            .await
    }

    pub async fn update_status(&self, item_id: i64, status: ItemStatus) -> Result<(), ApiError> {
        self.client
            .put_discard(&items::update(item_id), &UpdateItemRequest { status })
            .await
    }

    pub async fn delete(&self, item_id: i64) -> Result<(), ApiError> {
        self.client.delete(&items::delete(item_id)).await
    }

    /// Whether the movie is among the watchlist's active items.
    pub async fn contains_movie(&self, watchlist_id: i64, movie_id: i64) -> Result<bool, ApiError> {
        let active = self.list_by_status(watchlist_id, ItemStatus::Active).await?;
        Ok(active.iter().any(|item| item.movie.id == movie_id))
    }
}
