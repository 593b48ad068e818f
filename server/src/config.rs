//! Service configuration, read from environment variables.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Which `DocumentStore` the service runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub mongodb_uri: String,
    pub database: String,
    pub collection: String,
    /// The single origin allowed to call the API from a browser.
    pub allowed_origin: HeaderValue,
    pub store: StoreKind,
    pub log_format: LogFormat,
}

impl Config {
    /// Load from the process environment, after applying a `.env` file if
    /// one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "127.0.0.1");
        let port = var("PORT", "8000");
        let addr_str = format!("{host}:{port}");
        let addr = addr_str.parse().map_err(|_| ConfigError::Invalid {
            name: "HOST/PORT",
            value: addr_str.clone(),
        })?;

        let origin = var("ALLOWED_ORIGIN", "https://localhost:5173");
        let invalid_origin = || ConfigError::Invalid {
            name: "ALLOWED_ORIGIN",
            value: origin.clone(),
        };
        // A wildcard cannot be combined with credentialed CORS.
        if origin == "*" {
            return Err(invalid_origin());
        }
        let allowed_origin = origin.parse().map_err(|_| invalid_origin())?;

        let store = match var("TODO_STORE", "mongo").as_str() {
            "mongo" => StoreKind::Mongo,
            "memory" => StoreKind::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "TODO_STORE",
                    value: other.to_string(),
                })
            }
        };

        let log_format = match var("LOG_FORMAT", "pretty").as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            addr,
            mongodb_uri: var("MONGODB_URI", "mongodb://localhost:27017/"),
            database: var("MONGODB_DATABASE", "TodoList"),
            collection: var("MONGODB_COLLECTION", "todos"),
            allowed_origin,
            store,
            log_format,
        })
    }
}
