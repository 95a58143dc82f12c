//! Environment-driven configuration.

use std::net::SocketAddr;

use thiserror::Error;

/// Default bind address when `STENCIL_BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Errors reading configuration from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid bind address '{addr}': {message}")]
    InvalidBindAddr { addr: String, message: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from the environment, reading a `.env` file first
    /// if one is present.
    ///
    /// `STENCIL_DATABASE_URL` takes precedence over `DATABASE_URL`;
    /// `STENCIL_BIND_ADDR` defaults to `127.0.0.1:8080`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real env vars still apply.
        let _ = dotenvy::dotenv();

        let database_url = std::env::var("STENCIL_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .map_err(|_| ConfigError::MissingVar("STENCIL_DATABASE_URL"))?;

        let addr =
            std::env::var("STENCIL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                addr,
                message: e.to_string(),
            })?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
