//! Tidepool Core - Core abstractions for the connectivity pool
//!
//! This crate provides the fundamental traits and types that the pool
//! crate depends on. It defines:
//!
//! - `Connection` - Trait for live database sessions
//! - `ConnectionConfig` - Static endpoint configuration
//! - Common types like `Value` and `Row`
//! - The `TidepoolError` taxonomy and `Result` alias

mod config;
mod connection;
mod error;
mod types;

pub use config::*;
pub use connection::*;
pub use error::*;
pub use types::*;
