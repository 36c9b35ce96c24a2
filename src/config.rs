//! Configuration loading from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL. Not needed in in-memory mode.
    pub database_url: Option<String>,
    /// Redis connection URL, used for the cache and the event log.
    /// Not needed in in-memory mode.
    pub redis_url: Option<String>,
    /// HTTP bind address.
    pub bind_addr: SocketAddr,
    /// Name of the payments table in the durable store.
    pub payment_table: String,
    /// Event log topic for change notifications.
    pub event_topic: String,
    /// Upper bound for each store, cache, and publisher call.
    pub op_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional (with defaults):
    /// - `PAYVAULT_PORT`: HTTP port (default: 8080)
    /// - `PAYVAULT_PAYMENT_TABLE`: payments table name (default: "payments")
    /// - `PAYVAULT_EVENT_TOPIC`: notification topic (default: "payments.commands")
    /// - `PAYVAULT_OPERATION_TIMEOUT_MS`: per-call timeout (default: 5000)
    ///
    /// Read lazily, required only when running against real backends:
    /// - `PAYVAULT_DATABASE_URL`, `PAYVAULT_REDIS_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = std::env::var("PAYVAULT_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("PAYVAULT_PORT", "must be a valid port number"))?;

        let timeout_ms: u64 = std::env::var("PAYVAULT_OPERATION_TIMEOUT_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid(
                    "PAYVAULT_OPERATION_TIMEOUT_MS",
                    "must be an integer number of milliseconds",
                )
            })?;

        Ok(Self {
            database_url: std::env::var("PAYVAULT_DATABASE_URL").ok(),
            redis_url: std::env::var("PAYVAULT_REDIS_URL").ok(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            payment_table: std::env::var("PAYVAULT_PAYMENT_TABLE")
                .unwrap_or_else(|_| "payments".to_string()),
            event_topic: std::env::var("PAYVAULT_EVENT_TOPIC")
                .unwrap_or_else(|_| "payments.commands".to_string()),
            op_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("PAYVAULT_DATABASE_URL"))
    }

    pub fn require_redis_url(&self) -> Result<&str, ConfigError> {
        self.redis_url
            .as_deref()
            .ok_or(ConfigError::Missing("PAYVAULT_REDIS_URL"))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
