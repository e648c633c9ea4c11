use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use reelbox_config::MoviesConfig;
use reelbox_models::{Movie, MoviePage, MovieRequest};
use serde::Serialize;
use std::collections::BTreeSet;

/// Query for the paginated listing. Serialized straight into the query string.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub direction: String,
}

impl PageRequest {
    pub fn from_config(config: &MoviesConfig, page: u32) -> Self {
        Self {
            page,
            size: config.page_size,
            sort: config.sort.clone(),
            direction: config.direction.clone(),
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self { page, ..self.clone() }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::from_config(&MoviesConfig::default(), 0)
    }
}

/// Tracks which page to load next. Nothing more: no cursors, no caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCounter {
    next: u32,
    has_more: bool,
}

impl PageCounter {
    pub fn new() -> Self {
        Self { next: 0, has_more: true }
    }

    /// Page number to request next, or `None` once the last page was seen.
    pub fn next_page(&self) -> Option<u32> {
        self.has_more.then_some(self.next)
    }

    pub fn record(&mut self, page: &MoviePage) {
        self.has_more = !page.last;
        self.next = page.number + 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for PageCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct SearchQuery<'q> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'q str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<&'q str>,
}

pub struct Movies<'a> {
    client: &'a ApiClient,
}

impl<'a> Movies<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Movie>, ApiError> {
        self.client.get(endpoints::movies::get_all()).await
    }

    pub async fn get(&self, id: i64) -> Result<Movie, ApiError> {
        self.client.get(&endpoints::movies::get_by_id(id)).await
    }

    pub async fn create(&self, movie: &MovieRequest) -> Result<Movie, ApiError> {
        self.client.post(endpoints::movies::create(), movie).await
    }

    pub async fn update(&self, id: i64, movie: &MovieRequest) -> Result<Movie, ApiError> {
        self.client.put(&endpoints::movies::update(id), movie).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&endpoints::movies::delete(id)).await
    }

    /// Free-text title search. The text travels as a query parameter, so it
    /// is encoded by the HTTP layer.
    pub async fn search(&self, text: &str) -> Result<Vec<Movie>, ApiError> {
        let query = SearchQuery { query: Some(text), genre: None };
        self.client.get_with_query(endpoints::movies::search(), &query).await
    }

    pub async fn by_genre(&self, genre: &str) -> Result<Vec<Movie>, ApiError> {
        let query = SearchQuery { query: None, genre: Some(genre) };
        self.client.get_with_query(endpoints::movies::search(), &query).await
    }

    pub async fn page(&self, request: &PageRequest) -> Result<MoviePage, ApiError> {
        self.client.get_with_query(endpoints::movies::page(), request).await
    }

    /// Distinct genres across the full catalogue, sorted.
    pub async fn genres(&self) -> Result<Vec<String>, ApiError> {
        Ok(collect_genres(&self.list().await?))
    }
}

fn collect_genres(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .flat_map(|movie| movie.genres.iter())
        .map(|genre| genre.trim())
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, last: bool) -> MoviePage {
        MoviePage {
            content: Vec::new(),
            last,
            number,
            total_pages: None,
            total_elements: None,
        }
    }

    #[test]
    fn test_default_page_request() {
        let request = PageRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 20);
        assert_eq!(request.sort, "releaseDate");
        assert_eq!(request.direction, "desc");
        assert_eq!(request.with_page(4).page, 4);
    }

    #[test]
    fn test_page_counter_advances_until_last() {
        let mut counter = PageCounter::new();
        assert_eq!(counter.next_page(), Some(0));

        counter.record(&page(0, false));
        assert_eq!(counter.next_page(), Some(1));

        counter.record(&page(1, true));
        assert_eq!(counter.next_page(), None);

        counter.reset();
        assert_eq!(counter.next_page(), Some(0));
    }

    #[test]
    fn test_collect_genres_dedupes_and_sorts() {
        let movie = |genres: &[&str]| Movie {
            id: 1,
            title: "x".to_string(),
            overview: String::new(),
            poster_url: None,
            release_date: None,
            vote_average: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        };
        let movies = vec![movie(&["Drama", "Crime"]), movie(&["Crime", " "]), movie(&[])];
        assert_eq!(collect_genres(&movies), vec!["Crime".to_string(), "Drama".to_string()]);
    }
}
