use std::sync::Arc;

use marquee::{
    AppState, build_router, config::Config, db, posters::PosterPicker, reviews::ReviewStore,
    tmdb::TmdbClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,marquee=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("marquee/0.1")
        .timeout(config.upstream_timeout)
        .build()?;

    let db = db::connect_and_migrate(&config).await?;

    let tmdb =
        TmdbClient::new(http, config.tmdb_api_key.clone(), config.tmdb_base_url.clone());

    let state = Arc::new(AppState {
        config: config.clone(),
        catalog: Arc::new(tmdb),
        reviews: ReviewStore::new(db, config.upstream_timeout),
        posters: PosterPicker::from_entropy(),
    });

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
