mod common;

use std::sync::atomic::Ordering;

use common::{FakeCatalog, genre, movie};
use marquee::posters::{PosterPicker, genre_cards, pick_random_poster};

#[tokio::test]
async fn empty_discovery_yields_no_poster() {
    let catalog = FakeCatalog::default();
    let picker = PosterPicker::seeded(1);

    assert_eq!(pick_random_poster(&catalog, &picker, 28).await, None);
}

#[tokio::test]
async fn failed_discovery_yields_no_poster() {
    let catalog = FakeCatalog { failing_genres: [28].into(), ..Default::default() };
    let picker = PosterPicker::seeded(1);

    assert_eq!(pick_random_poster(&catalog, &picker, 28).await, None);
}

#[tokio::test]
async fn pick_comes_from_the_genre_and_is_reproducible_with_a_seed() {
    let movies = vec![
        movie(1, "A", Some("/a.jpg")),
        movie(2, "B", Some("/b.jpg")),
        movie(3, "C", Some("/c.jpg")),
        movie(4, "D", Some("/d.jpg")),
    ];
    let catalog = FakeCatalog { by_genre: [(28, movies)].into(), ..Default::default() };

    let first = PosterPicker::seeded(42);
    let second = PosterPicker::seeded(42);
    for _ in 0..10 {
        let a = pick_random_poster(&catalog, &first, 28).await;
        let b = pick_random_poster(&catalog, &second, 28).await;
        assert_eq!(a, b);
        let a = a.expect("poster");
        assert!(["/a.jpg", "/b.jpg", "/c.jpg", "/d.jpg"].contains(&a.as_str()));
    }
}

#[tokio::test]
async fn picked_movie_without_poster_yields_none() {
    let catalog =
        FakeCatalog { by_genre: [(99, vec![movie(1, "A", None)])].into(), ..Default::default() };
    let picker = PosterPicker::seeded(3);

    assert_eq!(pick_random_poster(&catalog, &picker, 99).await, None);
}

#[tokio::test]
async fn cards_stay_aligned_with_genres_despite_failures_and_delays() {
    let genres = vec![genre(1, "Action"), genre(2, "Comedy"), genre(3, "Drama"), genre(4, "Horror")];
    let catalog = FakeCatalog {
        by_genre: [
            (1, vec![movie(10, "A", Some("/action.jpg"))]),
            (3, vec![movie(30, "D", Some("/drama.jpg"))]),
            (4, vec![movie(40, "H", Some("/horror.jpg"))]),
        ]
        .into(),
        failing_genres: [2].into(),
        // The first genre finishes last.
        delays_ms: [(1, 60), (2, 5), (3, 30)].into(),
        ..Default::default()
    };
    let picker = PosterPicker::seeded(9);

    let cards = genre_cards(&catalog, &picker, genres.clone()).await;

    assert_eq!(cards.len(), genres.len());
    for (card, genre) in cards.iter().zip(&genres) {
        assert_eq!(card.genre, *genre);
    }
    let posters: Vec<Option<&str>> = cards.iter().map(|c| c.poster_path.as_deref()).collect();
    assert_eq!(posters, vec![Some("/action.jpg"), None, Some("/drama.jpg"), Some("/horror.jpg")]);
}

#[tokio::test]
async fn one_failing_fetch_does_not_cancel_the_others() {
    let genres: Vec<_> = (1..=6).map(|id| genre(id, "g")).collect();
    let catalog = FakeCatalog {
        failing_genres: [1].into(),
        delays_ms: (2..=6).map(|id| (id, 20)).collect(),
        ..Default::default()
    };
    let picker = PosterPicker::seeded(0);

    let cards = genre_cards(&catalog, &picker, genres).await;

    assert_eq!(cards.len(), 6);
    assert_eq!(catalog.discover_calls.load(Ordering::SeqCst), 6);
    assert_eq!(catalog.discover_completed.load(Ordering::SeqCst), 6);
    assert!(cards.iter().all(|c| c.poster_path.is_none()));
}

#[tokio::test]
async fn no_genres_means_no_cards() {
    let catalog = FakeCatalog::default();
    let picker = PosterPicker::seeded(0);

    assert!(genre_cards(&catalog, &picker, Vec::new()).await.is_empty());
    assert_eq!(catalog.discover_calls.load(Ordering::SeqCst), 0);
}
