//! Error types for tidepool

use thiserror::Error;

/// Core error type for tidepool operations
#[derive(Error, Debug)]
pub enum TidepoolError {
    /// Execute was attempted on a session that is not connected.
    ///
    /// Recoverable: the caller should hand the connection back via
    /// `report_connection_error` and retry on a fresh one.
    #[error("Connection is not established")]
    NotConnected,

    /// The database rejected the statement (syntax, constraint violation, ...).
    ///
    /// This is a statement-level failure, not a connection-health signal.
    #[error("Driver error: {0}")]
    Driver(String),

    /// The request was malformed before it reached the driver.
    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for tidepool operations
pub type Result<T> = std::result::Result<T, TidepoolError>;
