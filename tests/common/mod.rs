#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use marquee::{
    AppState,
    config::Config,
    db,
    models::{Genre, Movie},
    posters::PosterPicker,
    reviews::ReviewStore,
    tmdb::{Catalog, FetchError},
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub fn movie(id: i32, title: &str, poster_path: Option<&str>) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: poster_path.map(str::to_string),
        overview: None,
        release_date: None,
        vote_average: None,
        extra: Default::default(),
    }
}

pub fn genre(id: i32, name: &str) -> Genre {
    Genre { id, name: name.to_string() }
}

fn upstream_failure() -> FetchError {
    FetchError::Status { status: 503, body: "catalog unavailable".to_string() }
}

/// In-memory catalog with per-genre failures and delays.
#[derive(Default)]
pub struct FakeCatalog {
    pub genres: Vec<Genre>,
    pub fail_genres: bool,
    pub by_genre: HashMap<i32, Vec<Movie>>,
    pub failing_genres: HashSet<i32>,
    pub delays_ms: HashMap<i32, u64>,
    pub movies: HashMap<i32, Movie>,
    pub search_results: Vec<Movie>,
    pub discover_calls: AtomicUsize,
    pub discover_completed: AtomicUsize,
    pub search_calls: AtomicUsize,
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn list_genres(&self) -> Result<Vec<Genre>, FetchError> {
        if self.fail_genres {
            return Err(upstream_failure());
        }
        Ok(self.genres.clone())
    }

    async fn discover_by_genre(&self, genre_id: i32) -> Result<Vec<Movie>, FetchError> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ms) = self.delays_ms.get(&genre_id) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        self.discover_completed.fetch_add(1, Ordering::SeqCst);
        if self.failing_genres.contains(&genre_id) {
            return Err(upstream_failure());
        }
        Ok(self.by_genre.get(&genre_id).cloned().unwrap_or_default())
    }

    async fn get_movie(&self, movie_id: i32) -> Result<Movie, FetchError> {
        self.movies
            .get(&movie_id)
            .cloned()
            .ok_or(FetchError::Status { status: 404, body: "not found".to_string() })
    }

    async fn search_movies(&self, _title: &str) -> Result<Vec<Movie>, FetchError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.search_results.clone())
    }
}

pub async fn review_store() -> ReviewStore {
    review_store_with_timeout(Duration::from_secs(5)).await.1
}

/// Single-connection SQLite store; the raw connection lets a test hold the pool.
pub async fn review_store_with_timeout(timeout: Duration) -> (DatabaseConnection, ReviewStore) {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await.expect("open sqlite");
    db::migrate(&conn).await.expect("migrate");
    (conn.clone(), ReviewStore::new(conn, timeout))
}

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        tmdb_api_key: "test".to_string(),
        tmdb_base_url: "http://catalog.invalid".to_string(),
        tmdb_image_base_url: "https://image.tmdb.org/t/p".to_string(),
        database_url: "sqlite::memory:".to_string(),
        database_tls_verify: false,
        database_max_connections: 1,
        upstream_timeout: Duration::from_secs(5),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"),
    }
}

pub async fn app_state(catalog: Arc<FakeCatalog>) -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(test_config()),
        catalog,
        reviews: review_store().await,
        posters: PosterPicker::seeded(7),
    })
}
