//! Connection trait

use crate::{Result, Row, Value};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A live database session.
///
/// Implementations wrap one concrete driver session. Construction is expected
/// to establish the session eagerly; if establishment fails, the implementation
/// must come up with `is_connected() == false` instead of signaling an error,
/// so the pool can apply its replacement policy centrally. Callers must check
/// `is_connected` before trusting a freshly created connection.
///
/// A connection is exclusively owned by the pool while idle and lent to exactly
/// one caller while checked out; it is never shared between concurrent holders.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Process-unique identifier, stable for the connection's lifetime
    fn id(&self) -> Uuid;

    /// Get the driver name (e.g., "postgres", "mysql")
    fn driver_name(&self) -> &str;

    /// Whether the underlying session is currently established
    fn is_connected(&self) -> bool;

    /// Timestamp of the last successful round-trip on this session, if known.
    ///
    /// Used by callers that want to apply their own staleness policy before
    /// trusting an idle connection.
    fn last_verified_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Execute a parameterized statement and return the result rows.
    ///
    /// Fails with `TidepoolError::NotConnected` if the session is down and
    /// `TidepoolError::Driver` if the database rejects the statement.
    async fn execute(&self, query: &str, params: &[Value]) -> Result<Vec<Row>>;

    /// Close the connection, releasing the underlying session.
    ///
    /// Idempotent. After close, `is_connected()` returns false and any
    /// subsequent `execute` fails with `TidepoolError::NotConnected`.
    async fn close(&self) -> Result<()>;
}
