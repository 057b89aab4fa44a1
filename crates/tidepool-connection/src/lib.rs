//! Tidepool Connection - Pooling and lifecycle for database sessions
//!
//! This crate provides the connectivity pool: a bounded, self-healing set of
//! persistent connections shared across an application's services, plus the
//! health and retry helpers its consumers use around it.

pub mod health;
pub mod pool;
pub mod retry;

pub use health::{
    HealthStatus, HealthThresholds, PingError, PingResult, ping, ping_with_timeout,
    wait_for_ready,
};
pub use pool::{ConnectionFactory, ConnectivityPool, PoolConfig, PoolStats};
pub use retry::{BackoffStrategy, acquire_with_backoff};
