use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, Redirect},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{
        DeleteReviewForm, NewReviewForm, SearchQuery, UpdateReviewForm, review_path,
        sanitize_title,
    },
    posters, templates,
};

pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let genres = state.catalog.list_genres().await?;
    tracing::debug!(genres = genres.len(), "fetching genre posters");

    let cards = posters::genre_cards(state.catalog.as_ref(), &state.posters, genres).await;
    Ok(Html(templates::home_page(&cards, &state.config.tmdb_image_base_url)))
}

/// Jumps to the best-ranked match, or back home when there is none.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Redirect> {
    let Some(name) = q.movie_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(Redirect::to("/"));
    };

    let results = state.catalog.search_movies(name).await?;
    match results.first() {
        Some(best) => {
            tracing::debug!(query = %name, movie_id = best.id, "search matched");
            Ok(Redirect::to(&review_path(best.id, &best.title)))
        },
        None => {
            tracing::debug!(query = %name, "search found nothing");
            Ok(Redirect::to("/"))
        },
    }
}

pub async fn genre(
    State(state): State<Arc<AppState>>,
    Path((genre_id, genre_name)): Path<(i32, String)>,
) -> AppResult<Html<String>> {
    let movies = state.catalog.discover_by_genre(genre_id).await?;
    Ok(Html(templates::genre_page(&genre_name, &movies, &state.config.tmdb_image_base_url)))
}

pub async fn review(
    State(state): State<Arc<AppState>>,
    Path((movie_id, _movie_title)): Path<(i32, String)>,
) -> AppResult<Html<String>> {
    let (movie, reviews) = tokio::try_join!(
        async { state.catalog.get_movie(movie_id).await.map_err(AppError::from) },
        async { state.reviews.list_by_movie(movie_id).await.map_err(AppError::from) },
    )?;

    Ok(Html(templates::review_page(&movie, &reviews, &state.config.tmdb_image_base_url)))
}

pub async fn new_review(
    State(state): State<Arc<AppState>>,
    Path((movie_id, movie_title)): Path<(i32, String)>,
) -> AppResult<Html<String>> {
    let movie_title = sanitize_title(&movie_title);
    let movie = state.catalog.get_movie(movie_id).await?;

    Ok(Html(templates::review_form_page(&templates::ReviewFormView {
        movie: &movie,
        movie_id,
        movie_title: &movie_title,
        heading: "New Review",
        submit: "Create Review",
        review: None,
    })))
}

pub async fn edit_review(
    State(state): State<Arc<AppState>>,
    Path((movie_id, movie_title, review_id)): Path<(i32, String, i32)>,
) -> AppResult<Html<String>> {
    let movie_title = sanitize_title(&movie_title);
    let (movie, review) = tokio::try_join!(
        async { state.catalog.get_movie(movie_id).await.map_err(AppError::from) },
        async { state.reviews.get_by_id(review_id, movie_id).await.map_err(AppError::from) },
    )?;

    Ok(Html(templates::review_form_page(&templates::ReviewFormView {
        movie: &movie,
        movie_id,
        movie_title: &movie_title,
        heading: "Edit Review",
        submit: "Update Review",
        review: Some(&review),
    })))
}

pub async fn add_review(
    State(state): State<Arc<AppState>>,
    Path((movie_id, movie_title)): Path<(i32, String)>,
    Form(form): Form<NewReviewForm>,
) -> AppResult<Redirect> {
    state.reviews.add(&form.name, form.score, &form.content, movie_id).await?;
    Ok(Redirect::to(&review_path(movie_id, &movie_title)))
}

pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Path((movie_id, movie_title)): Path<(i32, String)>,
    Form(form): Form<UpdateReviewForm>,
) -> AppResult<Redirect> {
    let review_id = form.edit_review_id.ok_or_else(missing_review_id)?;
    apply_update(&state, movie_id, &movie_title, review_id, form).await
}

pub async fn update_review_at(
    State(state): State<Arc<AppState>>,
    Path((movie_id, movie_title, review_id)): Path<(i32, String, i32)>,
    Form(form): Form<UpdateReviewForm>,
) -> AppResult<Redirect> {
    apply_update(&state, movie_id, &movie_title, review_id, form).await
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Path((movie_id, movie_title)): Path<(i32, String)>,
    Form(form): Form<DeleteReviewForm>,
) -> AppResult<Redirect> {
    let review_id = form.delete_review_id.ok_or_else(missing_review_id)?;
    apply_delete(&state, movie_id, &movie_title, review_id).await
}

pub async fn delete_review_at(
    State(state): State<Arc<AppState>>,
    Path((movie_id, movie_title, review_id)): Path<(i32, String, i32)>,
) -> AppResult<Redirect> {
    apply_delete(&state, movie_id, &movie_title, review_id).await
}

async fn apply_update(
    state: &AppState,
    movie_id: i32,
    movie_title: &str,
    review_id: i32,
    form: UpdateReviewForm,
) -> AppResult<Redirect> {
    state.reviews.update(review_id, movie_id, form.score, &form.content).await?;
    Ok(Redirect::to(&review_path(movie_id, movie_title)))
}

async fn apply_delete(
    state: &AppState,
    movie_id: i32,
    movie_title: &str,
    review_id: i32,
) -> AppResult<Redirect> {
    state.reviews.delete(review_id, movie_id).await?;
    Ok(Redirect::to(&review_path(movie_id, movie_title)))
}

fn missing_review_id() -> AppError {
    AppError::NotFound("no review selected".to_string())
}
