//! Connection pooling for database sessions
//!
//! This module provides a bounded connectivity pool with explicit
//! checkout/return, startup readiness gating, and replace-on-failure healing.
//!
//! # Example
//!
//! ```ignore
//! use tidepool_connection::pool::{ConnectivityPool, PoolConfig};
//!
//! let config = PoolConfig::new(2, 8);
//! let pool = ConnectivityPool::new(config, factory);
//! pool.initialize().await;
//!
//! if let Some(conn) = pool.acquire().await {
//!     let rows = conn.execute("SELECT id FROM users", &[]).await?;
//!     pool.release(conn).await;
//! }
//! ```

mod config;
mod pool;
mod stats;


pub use config::PoolConfig;
pub use pool::{ConnectionFactory, ConnectivityPool};
pub use stats::PoolStats;
