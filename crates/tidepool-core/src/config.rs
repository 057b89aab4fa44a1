//! Static endpoint configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Result, TidepoolError};

/// TLS policy for the underlying session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TlsMode {
    /// Never use TLS
    Disable,
    /// Use TLS if the server supports it
    #[default]
    Prefer,
    /// Fail if TLS cannot be negotiated
    Require,
}

impl std::str::FromStr for TlsMode {
    type Err = TidepoolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "disable" => Ok(TlsMode::Disable),
            "prefer" => Ok(TlsMode::Prefer),
            "require" => Ok(TlsMode::Require),
            other => Err(TidepoolError::Configuration(format!(
                "Unknown TLS mode: {}",
                other
            ))),
        }
    }
}

/// Static configuration for one database endpoint.
///
/// Read once at process start from a trusted source (file or environment)
/// and handed to the connection factory; never re-read afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Database name
    pub database: String,
    /// TLS policy
    #[serde(default)]
    pub tls: TlsMode,
}

impl ConnectionConfig {
    /// Create a new configuration
    pub fn new(host: &str, port: u16, username: &str, password: &str, database: &str) -> Self {
        Self {
            host: host.to_string(),
            port,
            username: username.to_string(),
            password: password.to_string(),
            database: database.to_string(),
            tls: TlsMode::default(),
        }
    }

    /// Set the TLS policy
    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    /// Load configuration from `TIDEPOOL_DB_*` environment variables.
    ///
    /// Required: `TIDEPOOL_DB_HOST`, `TIDEPOOL_DB_USER`, `TIDEPOOL_DB_PASSWORD`,
    /// `TIDEPOOL_DB_NAME`. Optional: `TIDEPOOL_DB_PORT` (default 5432),
    /// `TIDEPOOL_DB_TLS` (default "prefer").
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ConnectionConfig = toml::from_str(&contents)
            .map_err(|e| TidepoolError::Configuration(format!("Invalid config file: {}", e)))?;
        config.validate()?;
        tracing::debug!(host = %config.host, port = config.port, database = %config.database, "loaded connection config from file");
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| {
                TidepoolError::Configuration(format!("Missing environment variable: {}", key))
            })
        };

        let port = match lookup("TIDEPOOL_DB_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                TidepoolError::Configuration(format!("Invalid TIDEPOOL_DB_PORT: {}", raw))
            })?,
            None => 5432,
        };
        let tls = match lookup("TIDEPOOL_DB_TLS") {
            Some(raw) => raw.parse()?,
            None => TlsMode::default(),
        };

        let config = Self {
            host: require("TIDEPOOL_DB_HOST")?,
            port,
            username: require("TIDEPOOL_DB_USER")?,
            password: require("TIDEPOOL_DB_PASSWORD")?,
            database: require("TIDEPOOL_DB_NAME")?,
            tls,
        };
        config.validate()?;
        // Never log the password.
        tracing::debug!(host = %config.host, port = config.port, database = %config.database, "loaded connection config from environment");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(TidepoolError::Configuration("host must not be empty".into()));
        }
        if self.database.is_empty() {
            return Err(TidepoolError::Configuration(
                "database name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
