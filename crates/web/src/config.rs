//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CUPPA_DATABASE_URL` - `SQLite` connection string (default: `sqlite://cafes.db`)
//! - `CUPPA_HOST` - Bind address (default: 127.0.0.1)
//! - `CUPPA_PORT` - Listen port (default: 3000)
//! - `CUPPA_BASE_URL` - Public URL for the site (default: `http://localhost:3000`)
//! - `MAPS_API_KEY` - Google Maps embed key for the café detail view

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Default `SQLite` database location, shared with the CLI.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://cafes.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SQLite` database connection URL
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Google Maps embed API key, consumed only to build the detail-view map URL
    pub maps_api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_env_or_default("CUPPA_DATABASE_URL", DEFAULT_DATABASE_URL);
        let host = get_env_or_default("CUPPA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CUPPA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CUPPA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CUPPA_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("CUPPA_BASE_URL", "http://localhost:3000");
        let maps_api_key = get_optional_env("MAPS_API_KEY");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            maps_api_key,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
