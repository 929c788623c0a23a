use anyhow::Context;
use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;

pub async fn connect_and_migrate(config: &Config) -> anyhow::Result<DatabaseConnection> {
    let url = with_tls_mode(&config.database_url, config.database_tls_verify);

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(config.database_max_connections.max(1))
        .connect_timeout(config.upstream_timeout)
        .acquire_timeout(config.upstream_timeout)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.context("connecting to database")?;
    migrate(&db).await?;
    Ok(db)
}

pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(db, None).await.context("running migrations")?;
    tracing::info!("database migrations applied");
    Ok(())
}

/// Pins the Postgres `sslmode` unless the URL already chooses one.
pub fn with_tls_mode(database_url: &str, verify: bool) -> String {
    let is_postgres =
        database_url.starts_with("postgres://") || database_url.starts_with("postgresql://");
    if !is_postgres || database_url.contains("sslmode=") {
        return database_url.to_string();
    }

    let mode = if verify { "verify-full" } else { "prefer" };
    let sep = if database_url.contains('?') { '&' } else { '?' };
    format!("{database_url}{sep}sslmode={mode}")
}
