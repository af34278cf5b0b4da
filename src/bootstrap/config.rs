use std::env;
use std::fmt;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseTarget,
    pub pool: PoolSettings,
    pub youtube_api_key: Option<String>,
    pub search_base_url: String,
    pub search_timeout_secs: u64,
    pub is_production: bool,
}

/// Where the vote store lives.
#[derive(Clone)]
pub enum DatabaseTarget {
    Url(String),
    Tcp {
        host: String,
        port: u16,
        credentials: DbCredentials,
    },
    Socket {
        /// Directory holding the Postgres unix socket, e.g. `/cloudsql/<instance>`.
        path: String,
        credentials: DbCredentials,
    },
}

#[derive(Clone)]
pub struct DbCredentials {
    pub user: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseTarget::Url(_) => f.write_str("Url(<redacted>)"),
            DatabaseTarget::Tcp {
                host,
                port,
                credentials,
            } => f
                .debug_struct("Tcp")
                .field("host", host)
                .field("port", port)
                .field("user", &credentials.user)
                .field("database", &credentials.database)
                .finish(),
            DatabaseTarget::Socket { path, credentials } => f
                .debug_struct("Socket")
                .field("path", path)
                .field("user", &credentials.user)
                .field("database", &credentials.database)
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 7,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
            acquire_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            var(key).ok_or_else(|| anyhow::anyhow!("{key} environment variable not set"))
        };

        let port = var("PORT").and_then(|s| s.parse().ok()).unwrap_or(8080);

        let database = if let Some(url) = var("DATABASE_URL") {
            DatabaseTarget::Url(url)
        } else if let Some(host) = var("DB_TCP_HOST") {
            let port = match var("DB_PORT") {
                Some(p) => p
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid DB_PORT value: {e}"))?,
                None => 5432,
            };
            DatabaseTarget::Tcp {
                host,
                port,
                credentials: DbCredentials {
                    user: require("DB_USER")?,
                    password: require("DB_PASS")?,
                    database: require("DB_NAME")?,
                },
            }
        } else {
            let socket_dir = var("DB_SOCKET_DIR").unwrap_or_else(|| "/cloudsql".into());
            let instance = require("INSTANCE_CONNECTION_NAME")?;
            DatabaseTarget::Socket {
                path: format!("{}/{}", socket_dir.trim_end_matches('/'), instance),
                credentials: DbCredentials {
                    user: require("DB_USER")?,
                    password: require("DB_PASS")?,
                    database: require("DB_NAME")?,
                },
            }
        };

        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_connections),
            idle_timeout_secs: var("DB_IDLE_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.idle_timeout_secs),
            max_lifetime_secs: var("DB_MAX_LIFETIME_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_lifetime_secs),
            acquire_timeout_secs: var("DB_ACQUIRE_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.acquire_timeout_secs),
        };

        let youtube_api_key = var("YOUTUBE_API_KEY");
        let search_base_url = var("SEARCH_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_SEARCH_BASE_URL.into());
        let search_timeout_secs = var("SEARCH_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let is_production = matches!(
            var("RUST_ENV").as_deref(),
            Some("production") | Some("prod")
        );

        if is_production && youtube_api_key.is_none() {
            anyhow::bail!("YOUTUBE_API_KEY must be set in production");
        }

        Ok(Self {
            port,
            database,
            pool,
            youtube_api_key,
            search_base_url,
            search_timeout_secs,
            is_production,
        })
    }
}
