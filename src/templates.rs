use maud::{DOCTYPE, Markup, html};

use crate::models::{GenreCard, Movie, Review, review_path};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// Inputs for the shared new/edit review form.
pub struct ReviewFormView<'a> {
    pub movie: &'a Movie,
    pub movie_id: i32,
    pub movie_title: &'a str,
    pub heading: &'a str,
    pub submit: &'a str,
    pub review: Option<&'a Review>,
}

pub fn home_page(cards: &[GenreCard], image_base_url: &str) -> String {
    page(
        "Movie Reviews",
        html! {
            div class="max-w-6xl mx-auto px-6 py-10" {
                h1 class="text-3xl font-bold text-gray-900" { "Browse by genre" }
                (search_form())

                div class="mt-8 grid gap-6 grid-cols-2 md:grid-cols-4" {
                    @for card in cards {
                        a class="block bg-white shadow rounded-lg overflow-hidden hover:shadow-lg"
                            href=(format!("/genre/{}/{}", card.genre.id, urlencoding::encode(&card.genre.name))) {
                            (poster(card.poster_path.as_deref(), &card.genre.name, image_base_url))
                            div class="p-3 font-semibold text-gray-800" { (card.genre.name) }
                        }
                    }
                }
            }
        },
    )
}

pub fn genre_page(genre_name: &str, movies: &[Movie], image_base_url: &str) -> String {
    page(
        genre_name,
        html! {
            div class="max-w-6xl mx-auto px-6 py-10" {
                a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "All genres" }
                h1 class="mt-2 text-3xl font-bold text-gray-900" { (genre_name) }

                @if movies.is_empty() {
                    p class="mt-8 text-gray-600" { "No movies found for this genre." }
                } @else {
                    div class="mt-8 grid gap-6 grid-cols-2 md:grid-cols-4" {
                        @for movie in movies {
                            a class="block bg-white shadow rounded-lg overflow-hidden hover:shadow-lg"
                                href=(review_path(movie.id, &movie.title)) {
                                (poster(movie.poster_path.as_deref(), &movie.title, image_base_url))
                                div class="p-3 text-gray-800" { (movie.title) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn review_page(movie: &Movie, reviews: &[Review], image_base_url: &str) -> String {
    let base = review_path(movie.id, &movie.title);

    page(
        &movie.title,
        html! {
            div class="max-w-4xl mx-auto px-6 py-10" {
                a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "Home" }
                div class="mt-4 flex gap-6" {
                    div class="w-48 shrink-0" {
                        (poster(movie.poster_path.as_deref(), &movie.title, image_base_url))
                    }
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { (movie.title) }
                        @if let Some(date) = &movie.release_date {
                            p class="mt-1 text-gray-500" { (date) }
                        }
                        @if let Some(vote) = movie.vote_average {
                            p class="mt-1 text-gray-500" { "Rating " (format!("{vote:.1}")) }
                        }
                        @if let Some(overview) = &movie.overview {
                            p class="mt-4 text-gray-700" { (overview) }
                        }
                        a class="mt-6 inline-block rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700"
                            href=(format!("{base}/new")) { "Write a review" }
                    }
                }

                h2 class="mt-10 text-2xl font-semibold text-gray-900" { "Reviews" }
                @if reviews.is_empty() {
                    p class="mt-4 text-gray-600" { "No reviews yet." }
                } @else {
                    div class="mt-4 space-y-4" {
                        @for review in reviews {
                            (review_card(review, &base))
                        }
                    }
                }
            }
        },
    )
}

pub fn review_form_page(view: &ReviewFormView<'_>) -> String {
    let base = review_path(view.movie_id, view.movie_title);
    let action = match view.review {
        Some(review) => format!("{base}/update/{}", review.id),
        None => format!("{base}/add"),
    };

    page(
        view.heading,
        html! {
            div class="max-w-2xl mx-auto px-6 py-10" {
                a class="text-sm text-blue-600 hover:text-blue-800" href=(base) { "Back to " (view.movie_title) }
                h1 class="mt-2 text-3xl font-bold text-gray-900" { (view.heading) ": " (view.movie_title) }
                @if let Some(overview) = &view.movie.overview {
                    p class="mt-2 text-gray-600" { (overview) }
                }

                form class="mt-8 space-y-6 bg-white shadow rounded-lg p-8" method="post" action=(action) {
                    @if view.review.is_none() {
                        div {
                            label class="block text-sm font-medium text-gray-700" for="name" { "Name" }
                            input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="name" id="name" required;
                        }
                    }
                    div {
                        label class="block text-sm font-medium text-gray-700" for="score" { "Score" }
                        input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" type="number"
                            step="0.5" min="0" max="10" name="score" id="score" required
                            value=[view.review.map(|r| r.score)];
                    }
                    div {
                        label class="block text-sm font-medium text-gray-700" for="content" { "Review" }
                        textarea class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" rows="6" name="content" id="content" required {
                            @if let Some(review) = view.review { (review.content) }
                        }
                    }
                    button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { (view.submit) }
                }
            }
        },
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
                link rel="stylesheet" href="/styles.css";
            }
            body class="bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn search_form() -> Markup {
    html! {
        form class="mt-6 flex gap-2" method="get" action="/search" {
            input class="flex-1 rounded-md border border-gray-300 px-3 py-2" name="movieName" placeholder="Search for a movie" required;
            button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
        }
    }
}

fn poster(path: Option<&str>, alt: &str, image_base_url: &str) -> Markup {
    html! {
        @match path {
            Some(path) => {
                img class="w-full aspect-[2/3] object-cover" src=(poster_url(image_base_url, path)) alt=(alt);
            },
            None => {
                div class="w-full aspect-[2/3] bg-gray-200 flex items-center justify-center text-gray-500" { "No poster" }
            },
        }
    }
}

fn review_card(review: &Review, base: &str) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start justify-between gap-4" {
                div {
                    h3 class="text-lg font-semibold text-gray-900" { (review.name) }
                    p class="text-sm text-gray-500" { "Score " (review.score) }
                }
                div class="flex gap-3" {
                    a class="text-sm text-blue-600 hover:text-blue-800" href=(format!("{base}/edit/{}", review.id)) { "Edit" }
                    form method="post" action=(format!("{base}/delete/{}", review.id)) {
                        button class="text-sm text-red-600 hover:text-red-800" type="submit" { "Delete" }
                    }
                }
            }
            p class="mt-4 text-gray-700 whitespace-pre-line" { (review.content) }
        }
    }
}

fn poster_url(image_base_url: &str, path: &str) -> String {
    format!("{}/w500{}", image_base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_url_joins_size_and_path() {
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn form_for_a_title_that_sanitizes_away_still_posts_to_a_route() {
        let movie = Movie {
            id: 42,
            title: "???".to_string(),
            poster_path: None,
            overview: None,
            release_date: None,
            vote_average: None,
            extra: Default::default(),
        };
        let html = review_form_page(&ReviewFormView {
            movie: &movie,
            movie_id: 42,
            movie_title: "",
            heading: "New Review",
            submit: "Create Review",
            review: None,
        });
        assert!(html.contains(r#"action="/review/42/untitled/add""#));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = error_page("<b>nope</b>");
        assert!(html.contains("&lt;b&gt;nope&lt;/b&gt;"));
    }
}
