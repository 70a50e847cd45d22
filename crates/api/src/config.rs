use notifeed_core::pagination::{PaginationConfig, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Page size bounds for notification listing.
    pub pagination: PaginationConfig,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DEFAULT_PAGE_SIZE`    | `20`                       |
    /// | `MAX_PAGE_SIZE`        | `100`                      |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values or inconsistent page size bounds, so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_page_size: i64 = std::env::var("DEFAULT_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .expect("DEFAULT_PAGE_SIZE must be a valid i64");

        let max_page_size: i64 = std::env::var("MAX_PAGE_SIZE")
            .unwrap_or_else(|_| MAX_PAGE_SIZE.to_string())
            .parse()
            .expect("MAX_PAGE_SIZE must be a valid i64");

        let pagination = PaginationConfig::new(default_page_size, max_page_size)
            .unwrap_or_else(|e| panic!("Invalid pagination settings: {e}"));

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            pagination,
            jwt,
        }
    }
}
