use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};

use crate::bootstrap::config::{DatabaseTarget, DbCredentials, PoolSettings};

pub type PgPool = Pool<Postgres>;

pub fn connect_options(target: &DatabaseTarget) -> anyhow::Result<PgConnectOptions> {
    let with_credentials = |opts: PgConnectOptions, c: &DbCredentials| {
        opts.username(&c.user)
            .password(&c.password)
            .database(&c.database)
    };
    let opts = match target {
        DatabaseTarget::Url(url) => PgConnectOptions::from_str(url)?,
        DatabaseTarget::Tcp {
            host,
            port,
            credentials,
        } => with_credentials(PgConnectOptions::new().host(host).port(*port), credentials),
        DatabaseTarget::Socket { path, credentials } => {
            with_credentials(PgConnectOptions::new().socket(path), credentials)
        }
    };
    Ok(opts)
}

pub async fn connect_pool(target: &DatabaseTarget, settings: &PoolSettings) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(settings.max_lifetime_secs))
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(connect_options(target)?)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub mod repositories;
