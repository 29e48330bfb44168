use std::env;
use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub api_docs: ApiDocsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Connection settings for the MySQL store and its pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub port: u16,
    /// Upper bound on concurrent store connections; further acquisitions wait
    pub connection_limit: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ApiDocsConfig {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            app: AppConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            api_docs: ApiDocsConfig::from_lookup(&lookup),
        })
    }
}

fn var_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parse_var_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

impl AppConfig {
    const DEFAULT_PORT: u16 = 3000;
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 1024 * 1024; // 1MB

    fn from_lookup<F>(lookup: &F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var_or(lookup, "HOST", "0.0.0.0");
        let port = parse_var_or(lookup, "PORT", Self::DEFAULT_PORT)?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = var_or(lookup, "CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = parse_var_or(
            lookup,
            "MAX_REQUEST_BODY_SIZE",
            Self::DEFAULT_MAX_REQUEST_BODY_SIZE,
        )?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_PORT: u16 = 3306;
    const DEFAULT_CONNECTION_LIMIT: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 0;
    // 0 means requests queue for a connection until one frees up
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 0;
    // sqlx adds the timeout to `Instant::now()`, so "forever" has to stay finite
    const UNBOUNDED_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    fn from_lookup<F>(lookup: &F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_limit =
            parse_var_or(lookup, "DB_CONN_LIMIT", Self::DEFAULT_CONNECTION_LIMIT)?;
        if connection_limit == 0 {
            return Err("DB_CONN_LIMIT must be greater than zero".to_string());
        }

        Ok(Self {
            host: var_or(lookup, "DB_HOST", "localhost"),
            user: var_or(lookup, "DB_USER", "root"),
            password: var_or(lookup, "DB_PASSWORD", ""),
            name: var_or(lookup, "DB_NAME", "schooldb"),
            port: parse_var_or(lookup, "DB_PORT", Self::DEFAULT_PORT)?,
            connection_limit,
            min_connections: parse_var_or(
                lookup,
                "DB_MIN_CONNECTIONS",
                Self::DEFAULT_MIN_CONNECTIONS,
            )?,
            acquire_timeout_secs: parse_var_or(
                lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_var_or(
                lookup,
                "DB_IDLE_TIMEOUT_SECS",
                Self::DEFAULT_IDLE_TIMEOUT_SECS,
            )?,
            max_lifetime_secs: parse_var_or(
                lookup,
                "DB_MAX_LIFETIME_SECS",
                Self::DEFAULT_MAX_LIFETIME_SECS,
            )?,
        })
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name)
            .timezone(Some(String::from("+00:00")));

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        match self.acquire_timeout_secs {
            0 => Self::UNBOUNDED_ACQUIRE_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

impl ApiDocsConfig {
    fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            title: var_or(lookup, "API_DOCS_TITLE", "School API"),
            version: var_or(lookup, "API_DOCS_VERSION", env!("CARGO_PKG_VERSION")),
            description: var_or(
                lookup,
                "API_DOCS_DESCRIPTION",
                "Record schools and list them by distance from a point",
            ),
        }
    }
}
