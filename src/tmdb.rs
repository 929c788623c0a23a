use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};

use crate::models::{Genre, Movie};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed upstream payload: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

/// Read-only view of the movie catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list_genres(&self) -> Result<Vec<Genre>, FetchError>;

    /// First page of movies in a genre, most popular first.
    async fn discover_by_genre(&self, genre_id: i32) -> Result<Vec<Movie>, FetchError>;

    async fn get_movie(&self, movie_id: i32) -> Result<Movie, FetchError>;

    /// Title search in the catalog's own ranking order.
    async fn search_movies(&self, title: &str) -> Result<Vec<Movie>, FetchError>;
}

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided, catalog requests will be rejected upstream");
        }
        Self { client, api_key, base_url }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        tracing::debug!(%url, "catalog request");

        let resp = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { source, body })
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn list_genres(&self) -> Result<Vec<Genre>, FetchError> {
        let resp: GenreListResponse = self.get_json("genre/movie/list", &[]).await?;
        Ok(resp.genres)
    }

    async fn discover_by_genre(&self, genre_id: i32) -> Result<Vec<Movie>, FetchError> {
        let genre_id = genre_id.to_string();
        let resp: MovieListResponse = self
            .get_json(
                "discover/movie",
                &[
                    ("include_adult", "true"),
                    ("include_video", "true"),
                    ("page", "1"),
                    ("sort_by", "popularity.desc"),
                    ("with_genres", genre_id.as_str()),
                    ("language", "en-US"),
                ],
            )
            .await?;
        Ok(resp.results)
    }

    async fn get_movie(&self, movie_id: i32) -> Result<Movie, FetchError> {
        self.get_json(&format!("movie/{movie_id}"), &[("language", "en-US")]).await
    }

    async fn search_movies(&self, title: &str) -> Result<Vec<Movie>, FetchError> {
        let resp: MovieListResponse = self.get_json("search/movie", &[("query", title)]).await?;
        Ok(resp.results)
    }
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct MovieListResponse {
    results: Vec<Movie>,
}
