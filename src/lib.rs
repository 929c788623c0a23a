pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod posters;
pub mod reviews;
pub mod routes;
pub mod templates;
pub mod tmdb;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{config::Config, posters::PosterPicker, reviews::ReviewStore, tmdb::Catalog};

pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn Catalog>,
    pub reviews: ReviewStore,
    pub posters: PosterPicker,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(state.config.static_dir.clone());

    Router::new()
        .route("/", get(routes::home))
        .route("/search", get(routes::search))
        .route("/genre/{genre_id}/{genre_name}", get(routes::genre))
        .route("/review/{movie_id}/{movie_title}", get(routes::review))
        .route("/review/{movie_id}/{movie_title}/new", get(routes::new_review))
        .route("/review/{movie_id}/{movie_title}/edit/{review_id}", get(routes::edit_review))
        .route("/review/{movie_id}/{movie_title}/add", post(routes::add_review))
        .route("/review/{movie_id}/{movie_title}/update", post(routes::update_review))
        .route("/review/{movie_id}/{movie_title}/update/{review_id}", post(routes::update_review_at))
        .route("/review/{movie_id}/{movie_title}/delete", post(routes::delete_review))
        .route("/review/{movie_id}/{movie_title}/delete/{review_id}", post(routes::delete_review_at))
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
