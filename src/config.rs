//! # Configuration
//!
//! Layered application settings.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. optional `config/campus-events.{toml,yaml,json}` file
//! 3. environment variables prefixed `CAMPUS_EVENTS_`, using `__` between
//!    nested keys (`CAMPUS_EVENTS_SERVER__PORT=8080`,
//!    `CAMPUS_EVENTS_STORE__BACKEND=postgres`)
//!
//! A `.env` file in the working directory is loaded into the environment
//! first.
//!
//! # Examples
//!
//! ```ignore
//! use campus_events::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("listening on {}", config.server.address());
//! ```

use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Default HTTP port.
const DEFAULT_PORT: u16 = 5000;

/// Default preflight cache lifetime in seconds.
const DEFAULT_CORS_MAX_AGE_SECS: u32 = 60 * 60;

/// Default connection pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Environment variable prefix.
const ENV_PREFIX: &str = "CAMPUS_EVENTS";

/// Optional configuration file, without extension.
const CONFIG_FILE: &str = "config/campus-events";

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Backing store settings.
    pub store: StoreConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Create the demo events at startup.
    #[serde(default)]
    pub seed_demo_data: bool,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory of the built frontend served for non-API paths.
    pub static_dir: PathBuf,
    /// CORS preflight cache lifetime.
    pub cors_max_age_secs: u64,
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which [`EventStore`](crate::infrastructure::persistence::EventStore)
/// implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; contents are lost on restart.
    #[default]
    Memory,
    /// PostgreSQL through `sqlx`.
    Postgres,
    /// Redis hashes.
    Redis,
}

/// Backing store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Selected backend.
    pub backend: StoreBackend,
    /// PostgreSQL connection URL, required for [`StoreBackend::Postgres`].
    #[serde(default)]
    pub database_url: Option<String>,
    /// PostgreSQL pool size.
    pub max_connections: u32,
    /// Redis connection URL, required for [`StoreBackend::Redis`].
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Namespace for Redis keys.
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            redis_url: None,
            key_prefix: "campus-events".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl AppConfig {
    /// Loads configuration from defaults, the optional file and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a source cannot be parsed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the built-in defaults without consulting any source.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` only if the defaults themselves are invalid.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let store = StoreConfig::default();
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.static_dir", "dist")?
            .set_default(
                "server.cors_max_age_secs",
                i64::from(DEFAULT_CORS_MAX_AGE_SECS),
            )?
            .set_default("store.backend", "memory")?
            .set_default("store.max_connections", i64::from(store.max_connections))?
            .set_default("store.key_prefix", store.key_prefix)?
            .set_default("logging.filter", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("seed_demo_data", false)
    }
}
