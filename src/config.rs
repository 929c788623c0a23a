use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub database_url: String,
    pub database_tls_verify: bool,
    pub database_max_connections: u32,
    pub upstream_timeout: Duration,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port: u16 = var("PORT", "3000").parse().context("PORT")?;

        let tmdb_api_key = var("TMDB_API_KEY", "");
        let tmdb_base_url = var("TMDB_BASE_URL", "https://api.themoviedb.org/3");
        let tmdb_image_base_url = var("TMDB_IMAGE_BASE_URL", "https://image.tmdb.org/t/p");

        let database_url = var("DATABASE_URL", "postgres://localhost/marquee");
        let database_tls_verify: bool =
            var("DATABASE_TLS_VERIFY", "false").parse().context("DATABASE_TLS_VERIFY")?;
        let database_max_connections: u32 =
            var("DATABASE_MAX_CONNECTIONS", "5").parse().context("DATABASE_MAX_CONNECTIONS")?;

        let upstream_timeout_secs: u64 =
            var("UPSTREAM_TIMEOUT_SECS", "10").parse().context("UPSTREAM_TIMEOUT_SECS")?;
        if upstream_timeout_secs == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be at least 1");
        }

        let static_dir = PathBuf::from(var("STATIC_DIR", "public"));

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            database_url,
            database_tls_verify,
            database_max_connections,
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            static_dir,
        })
    }
}
