use std::sync::Mutex;

use futures::future;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, warn};

use crate::{
    models::{Genre, GenreCard, Movie},
    tmdb::Catalog,
};

/// Source of randomness for homepage art. Seed it to make picks reproducible.
pub struct PosterPicker {
    rng: Mutex<StdRng>,
}

impl PosterPicker {
    pub fn from_entropy() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    pub fn choose<'a>(&self, movies: &'a [Movie]) -> Option<&'a Movie> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        movies.choose(&mut *rng)
    }
}

/// Poster of one uniformly chosen movie in the genre. Never fails: errors become `None`.
pub async fn pick_random_poster(
    catalog: &dyn Catalog,
    picker: &PosterPicker,
    genre_id: i32,
) -> Option<String> {
    match catalog.discover_by_genre(genre_id).await {
        Ok(movies) => {
            let picked = picker.choose(&movies)?;
            debug!(genre_id, movie_id = picked.id, "picked genre poster");
            picked.poster_path.clone()
        },
        Err(err) => {
            warn!(genre_id, error = %err, "failed to fetch genre poster");
            None
        },
    }
}

/// Fetches one poster per genre concurrently. Output `i` always belongs to `genres[i]`,
/// and every fetch runs to completion regardless of the others.
pub async fn genre_cards(
    catalog: &dyn Catalog,
    picker: &PosterPicker,
    genres: Vec<Genre>,
) -> Vec<GenreCard> {
    let posters =
        future::join_all(genres.iter().map(|g| pick_random_poster(catalog, picker, g.id))).await;

    genres
        .into_iter()
        .zip(posters)
        .map(|(genre, poster_path)| GenreCard { genre, poster_path })
        .collect()
}
