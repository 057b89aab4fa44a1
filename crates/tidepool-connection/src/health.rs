//! Health check helpers for pooled connections
//!
//! This module provides ping, latency-based status classification, and the
//! readiness-polling loop an application startup sequence runs against the
//! pool.
//!
//! # Example
//!
//! ```ignore
//! use tidepool_connection::health::{ping, HealthStatus, wait_for_ready};
//!
//! // One-time liveness check on a checked-out connection
//! let latency = ping(conn.as_ref()).await?;
//! let status = HealthStatus::from_latency(latency);
//!
//! // Startup gate: block until the pool reports ready (or give up)
//! if !wait_for_ready(&pool, Duration::from_secs(10), Duration::from_millis(50)).await {
//!     // fall back to offline mode
//! }
//! ```

mod ping;
mod readiness;
mod status;


pub use ping::{PingError, PingResult, ping, ping_with_timeout};
pub use readiness::wait_for_ready;
pub use status::{HealthStatus, HealthThresholds};
