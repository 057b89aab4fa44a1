//! Connection ping
//!
//! Lightweight liveness probing by executing a minimal statement and
//! measuring the round-trip time.

use std::time::{Duration, Instant};
use tidepool_core::Connection;

/// Result of a ping operation
pub type PingResult = Result<Duration, PingError>;

/// Error that can occur during a ping operation
#[derive(Debug, Clone)]
pub enum PingError {
    /// The connection is not established
    NotConnected,
    /// The probe statement failed
    QueryFailed(String),
    /// The probe did not complete within the allotted time
    Timeout,
}

impl std::fmt::Display for PingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PingError::NotConnected => write!(f, "Connection is not established"),
            PingError::QueryFailed(msg) => write!(f, "Ping query failed: {}", msg),
            PingError::Timeout => write!(f, "Ping timed out"),
        }
    }
}

impl std::error::Error for PingError {}

/// Ping a connection to check that the session is alive.
///
/// Executes a minimal statement and returns the round-trip time. The pool
/// itself never pings idle connections; this is for callers that want a
/// validate-on-checkout policy, and for monitoring.
pub async fn ping(conn: &dyn Connection) -> PingResult {
    if !conn.is_connected() {
        return Err(PingError::NotConnected);
    }

    let start = Instant::now();
    let probe = ping_query(conn.driver_name());

    match conn.execute(probe, &[]).await {
        Ok(_) => Ok(start.elapsed()),
        Err(e) => Err(PingError::QueryFailed(e.to_string())),
    }
}

/// Ping with an upper bound on how long the probe may take
pub async fn ping_with_timeout(conn: &dyn Connection, timeout: Duration) -> PingResult {
    match tokio::time::timeout(timeout, ping(conn)).await {
        Ok(result) => result,
        Err(_) => Err(PingError::Timeout),
    }
}

/// Get the probe statement for a given driver.
///
/// `SELECT 1` is valid nearly everywhere; the match leaves room for drivers
/// with cheaper dedicated probes.
pub(super) fn ping_query(driver_name: &str) -> &'static str {
    match driver_name {
        "mysql" => "SELECT 1",
        "postgres" | "postgresql" => "SELECT 1",
        _ => "SELECT 1",
    }
}
