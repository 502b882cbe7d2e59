//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    /// Required for the postgres backend (no default, for safety).
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub server_addr: String,
    /// Ceiling applied to every individual store call.
    pub store_timeout: Duration,
    pub log_level: String,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(anyhow!(
                    "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                    other
                ))
            }
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set"));
        }

        let store_timeout_secs = match lookup("STORE_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("STORE_TIMEOUT_SECS must be a valid u64")?
                .max(1),
            None => 10,
        };

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a valid u32")?
                .max(1),
            None => 5,
        };

        Ok(Self {
            store_backend,
            database_url,
            db_max_connections,
            server_addr: lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:6000".to_string()),
            store_timeout: Duration::from_secs(store_timeout_secs),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))
    }
}
