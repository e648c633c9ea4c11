use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    // Older backend builds call this field posterPath
    #[serde(default, alias = "posterPath", skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Movie {
    /// Release year taken from the leading `YYYY` of the release date, if any.
    pub fn year(&self) -> Option<u32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok())
    }
}

/// Page envelope returned by the paginated movie listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    pub content: Vec<Movie>,
    pub last: bool,
    pub number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
}

/// Body for creating or replacing a movie.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    pub title: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub genres: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_accepts_both_poster_field_names() {
        let a: Movie = serde_json::from_str(r#"{"id":1,"title":"Heat","posterUrl":"/a.jpg"}"#).unwrap();
        let b: Movie = serde_json::from_str(r#"{"id":1,"title":"Heat","posterPath":"/a.jpg"}"#).unwrap();
        assert_eq!(a.poster_url.as_deref(), Some("/a.jpg"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_movie_year() {
        let mut movie: Movie = serde_json::from_str(r#"{"id":42,"title":"Alien","releaseDate":"1979-05-25"}"#).unwrap();
        assert_eq!(movie.year(), Some(1979));
        movie.release_date = None;
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_movie_page_envelope() {
        let json = r#"{"content":[{"id":1,"title":"A","genres":["Drama"]}],"last":false,"number":3}"#;
        let page: MoviePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].genres, vec!["Drama".to_string()]);
        assert!(!page.last);
        assert_eq!(page.number, 3);
    }
}
