use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie::Movie;
use crate::status::ItemStatus;

/// A user's named list of movies.
///
/// The list endpoints return `movieCount` without `items`; the detail endpoint
/// may embed the items. Local copies are replaced on re-fetch, never patched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<WatchlistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Watchlist {
    /// Number of movies, preferring the server-side count over embedded items.
    pub fn len(&self) -> usize {
        self.movie_count
            .map(|count| count as usize)
            .unwrap_or(self.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchlist_id: Option<i64>,
    pub movie: Movie,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchlistRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub movie_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateItemRequest {
    pub status: ItemStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watchlist_summary_shape() {
        let json = r#"{"id":5,"name":"Weekend","description":"Light stuff","movieCount":3}"#;
        let list: Watchlist = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.items.is_empty());
        assert!(list.user_id.is_none());
    }

    #[test]
    fn test_watchlist_item_shape() {
        let json = r#"{
            "id": 9,
            "movie": {"id": 42, "title": "Alien", "overview": "", "posterUrl": "/p.jpg", "genres": ["Horror"]},
            "status": "active",
            "addedAt": "2025-03-01T10:00:00Z"
        }"#;
        let item: WatchlistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.movie.id, 42);
        assert_eq!(item.status, ItemStatus::Active);
        assert!(item.added_at.is_some());
    }

    #[test]
    fn test_item_list_with_unfamiliar_status_decodes() {
        let json = r#"[
            {"id": 1, "movie": {"id": 10, "title": "Heat"}, "status": "active"},
            {"id": 2, "movie": {"id": 11, "title": "Ronin"}, "status": "plan_to_watch"}
        ]"#;
        let items: Vec<WatchlistItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].status, ItemStatus::Active);
        assert_eq!(items[1].status, ItemStatus::Other("plan_to_watch".to_string()));
    }

    #[test]
    fn test_add_item_request_body() {
        let body = serde_json::to_value(AddItemRequest { movie_id: 42 }).unwrap();
        assert_eq!(body, serde_json::json!({ "movieId": 42 }));
    }
}
