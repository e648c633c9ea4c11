//! Relative request paths for every backend operation.
//!
//! Each entry is a pure function of its parameters. Parameters are
//! interpolated verbatim; callers passing free-form text as a path segment
//! should run it through [`encode_segment`] first.

use std::fmt::Display;

/// Percent-encode free-form text for use as a single path segment.
pub fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

pub mod users {
    use super::Display;

    pub fn create() -> &'static str {
        "/users"
    }

    pub fn login() -> &'static str {
        "/users/login"
    }

    pub fn get_by_id(id: impl Display) -> String {
        format!("/users/{}", id)
    }

    pub fn update(id: impl Display) -> String {
        format!("/users/{}", id)
    }

    pub fn delete(id: impl Display) -> String {
        format!("/users/{}", id)
    }
}

pub mod movies {
    use super::Display;

    pub fn get_all() -> &'static str {
        "/movies"
    }

    pub fn create() -> &'static str {
        "/movies"
    }

    /// Free-text (`query`) and genre (`genre`) search, both as query parameters.
    pub fn search() -> &'static str {
        "/movies/search"
    }

    /// Paginated listing taking `page`, `size`, `sort` and `direction`.
    pub fn page() -> &'static str {
        "/movies/page"
    }

    pub fn get_by_id(id: impl Display) -> String {
        format!("/movies/{}", id)
    }

    pub fn update(id: impl Display) -> String {
        format!("/movies/{}", id)
    }

    pub fn delete(id: impl Display) -> String {
        format!("/movies/{}", id)
    }
}

pub mod watchlists {
    use super::Display;

    pub fn get_all() -> &'static str {
        "/watchlists"
    }

    pub fn get_by_user(user_id: impl Display) -> String {
        format!("/watchlists/user/{}", user_id)
    }

    pub fn create(user_id: impl Display) -> String {
        format!("/watchlists/user/{}", user_id)
    }

    pub fn get_by_id(id: impl Display) -> String {
        format!("/watchlists/{}", id)
    }

    pub fn update(id: impl Display) -> String {
        format!("/watchlists/{}", id)
    }

    pub fn delete(id: impl Display) -> String {
        format!("/watchlists/{}", id)
    }

    /// Items nested under a watchlist. Single-item operations are keyed by
    /// the item's own id, not the parent's.
    pub mod items {
        use super::Display;

        pub fn get_all(watchlist_id: impl Display) -> String {
            format!("/watchlists/{}/items", watchlist_id)
        }

        pub fn get_by_status(watchlist_id: impl Display, status: impl Display) -> String {
            format!("/watchlists/{}/items/status/{}", watchlist_id, status)
        }

        pub fn add(watchlist_id: impl Display) -> String {
            format!("/watchlists/{}/items", watchlist_id)
        }

        pub fn update(item_id: impl Display) -> String {
            format!("/watchlists/items/{}", item_id)
        }

        pub fn delete(item_id: impl Display) -> String {
            format!("/watchlists/items/{}", item_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelbox_models::ItemStatus;

    #[test]
    fn test_fixed_paths() {
        assert_eq!(users::create(), "/users");
        assert_eq!(users::login(), "/users/login");
        assert_eq!(movies::get_all(), "/movies");
        assert_eq!(movies::create(), "/movies");
        assert_eq!(movies::search(), "/movies/search");
        assert_eq!(movies::page(), "/movies/page");
        assert_eq!(watchlists::get_all(), "/watchlists");
    }

    #[test]
    fn test_single_id_paths() {
        assert_eq!(users::get_by_id("u1"), "/users/u1");
        assert_eq!(users::update("u1"), "/users/u1");
        assert_eq!(users::delete("u1"), "/users/u1");
        assert_eq!(movies::get_by_id("42"), "/movies/42");
        assert_eq!(movies::get_by_id(42), "/movies/42");
        assert_eq!(movies::update(42), "/movies/42");
        assert_eq!(movies::delete(42), "/movies/42");
        assert_eq!(watchlists::get_by_user("u1"), "/watchlists/user/u1");
        assert_eq!(watchlists::create("u1"), "/watchlists/user/u1");
        assert_eq!(watchlists::get_by_id(5), "/watchlists/5");
        assert_eq!(watchlists::update(5), "/watchlists/5");
        assert_eq!(watchlists::delete(5), "/watchlists/5");
    }

    #[test]
    fn test_item_paths_use_item_id_not_parent() {
        assert_eq!(watchlists::items::get_all(5), "/watchlists/5/items");
        assert_eq!(watchlists::items::update(9), "/watchlists/items/9");
        assert_eq!(watchlists::items::delete(9), "/watchlists/items/9");
    }

    #[test]
    fn test_item_add_is_deterministic_per_id() {
        let first = watchlists::items::add("w-1");
        let again = watchlists::items::add("w-1");
        let other = watchlists::items::add("w-2");
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(first.replace("w-1", "w-2"), other);
    }

    #[test]
    fn test_get_by_status_orders_watchlist_then_status() {
        for (id, status) in [("7", "active"), ("abc", "watched"), ("a-very-long-id", "x")] {
            let path = watchlists::items::get_by_status(id, status);
            let id_at = path.find(id).unwrap();
            let status_at = path.rfind(status).unwrap();
            assert!(id_at < status_at, "{}", path);
            assert_eq!(path, format!("/watchlists/{}/items/status/{}", id, status));
        }
        assert_eq!(
            watchlists::items::get_by_status(3, ItemStatus::Active),
            "/watchlists/3/items/status/active"
        );
    }

    #[test]
    fn test_parameters_are_interpolated_verbatim() {
        assert_eq!(movies::get_by_id("a b/c"), "/movies/a b/c");
        assert_eq!(
            watchlists::get_by_user(encode_segment("a b/c")),
            "/watchlists/user/a%20b%2Fc"
        );
    }
}
