//! Retry policy for pool acquisition
//!
//! `acquire` never blocks: exhaustion comes back as `None` and the caller is
//! expected to back off and try again. This module is the recommended way to
//! do that, pairing an exponential backoff strategy with a bounded retry
//! loop.
//!
//! # Example
//!
//! ```ignore
//! use tidepool_connection::retry::{BackoffStrategy, acquire_with_backoff};
//!
//! let backoff = BackoffStrategy::new(50, 5_000).with_jitter(true);
//! if let Some(conn) = acquire_with_backoff(&pool, &backoff, 5).await {
//!     // ...
//! }
//! ```

mod acquire;
mod backoff;

#[cfg(test)]
mod tests;

pub use acquire::acquire_with_backoff;
pub use backoff::BackoffStrategy;
