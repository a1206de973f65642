pub mod catalog;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => Err(Error::Config(format!(
                "Invalid STORE_BACKEND value: {other}. Must be memory or sqlite"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    /// Requests per second per client IP on `/api`
    pub api_rate_limit: u64,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// YAML recipe catalog loaded at startup; overrides the built-in samples
    pub path: Option<PathBuf>,
    pub seed_samples: bool,
}

fn env_or<T: FromStr>(name: &str, default: &str) -> Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let backend: StoreBackend = std::env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .parse()?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/recipes.db".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("PORT", "5000")?;
        let external_url = std::env::var("EXTERNAL_URL").ok();
        let api_rate_limit = env_or("API_RATE_LIMIT", "100")?;
        let max_request_body_size = env_or("MAX_REQUEST_BODY_SIZE", "1048576")?;

        let max_connections = env_or("DATABASE_MAX_CONNECTIONS", "10")?;
        let min_connections = env_or("DATABASE_MIN_CONNECTIONS", "1")?;
        let connection_timeout_seconds = env_or("DATABASE_CONNECTION_TIMEOUT", "30")?;
        let idle_timeout_seconds = env_or("DATABASE_IDLE_TIMEOUT", "600")?;

        let catalog_path = std::env::var("CATALOG_PATH").ok().map(PathBuf::from);
        let seed_samples: bool = env_or("SEED_SAMPLE_RECIPES", "true")?;

        Ok(Settings {
            store: StoreConfig {
                backend,
                database_url,
                max_connections,
                min_connections,
                connection_timeout_seconds,
                idle_timeout_seconds,
            },
            server: ServerConfig {
                host,
                port,
                external_url,
                api_rate_limit,
                max_request_body_size,
            },
            catalog: CatalogConfig {
                path: catalog_path,
                seed_samples,
            },
        })
    }

    /// Settings for tests and embedding: in-memory store, no seed data
    pub fn in_memory() -> Self {
        Settings {
            store: StoreConfig {
                backend: StoreBackend::Memory,
                database_url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
                connection_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                external_url: None,
                api_rate_limit: 100,
                max_request_body_size: 1048576,
            },
            catalog: CatalogConfig {
                path: None,
                seed_samples: false,
            },
        }
    }

    /// Base URL clients should use to reach this server
    pub fn server_url(&self) -> String {
        self.server
            .external_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.server.host, self.server.port))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.store.min_connections > self.store.max_connections {
            return Err(Error::Config(format!(
                "DATABASE_MIN_CONNECTIONS ({}) exceeds DATABASE_MAX_CONNECTIONS ({})",
                self.store.min_connections, self.store.max_connections
            )));
        }

        Ok(())
    }
}
