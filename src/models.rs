use serde::{Deserialize, Serialize};

pub use crate::entities::review::Model as Review;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Catalog movie record. Fields the pages don't read are kept in `extra` untouched.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Movie {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A genre paired with the poster picked for it on the homepage.
#[derive(Clone, Debug)]
pub struct GenreCard {
    pub genre: Genre,
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "movieName", default)]
    pub movie_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewReviewForm {
    pub name: String,
    pub score: f64,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewForm {
    pub score: f64,
    pub content: String,
    #[serde(rename = "editReviewId", default)]
    pub edit_review_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteReviewForm {
    #[serde(rename = "deleteReviewId", default)]
    pub delete_review_id: Option<i32>,
}

/// Strips every character outside `[A-Za-z0-9 ]`.
pub fn sanitize_title(title: &str) -> String {
    title.chars().filter(|c| c.is_ascii_alphanumeric() || *c == ' ').collect()
}

/// Path of a movie's review page, with the title percent-encoded.
/// A blank title still needs a segment for the route to match.
pub fn review_path(movie_id: i32, title: &str) -> String {
    let title = if title.trim().is_empty() { "untitled" } else { title };
    format!("/review/{}/{}", movie_id, urlencoding::encode(title))
}
