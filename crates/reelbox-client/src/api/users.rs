use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use reelbox_models::{User, UserUpdate};

pub struct Users<'a> {
    client: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        self.client.get(&endpoints::users::get_by_id(id)).await
    }

    /// Profile of the logged-in user.
    pub async fn me(&self) -> Result<User, ApiError> {
        let user_id = self.client.require_user_id().await?;
        self.get(&user_id).await
    }

    pub async fn update(&self, id: &str, update: &UserUpdate) -> Result<User, ApiError> {
        self.client.put(&endpoints::users::update(id), update).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&endpoints::users::delete(id)).await
    }
}
