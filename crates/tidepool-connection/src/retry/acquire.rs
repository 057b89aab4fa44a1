//! Bounded acquisition retry loop

use std::sync::Arc;

use tidepool_core::Connection;

use super::backoff::BackoffStrategy;
use crate::pool::ConnectivityPool;

/// Acquire a connection, backing off and retrying on exhaustion.
///
/// Makes up to `max_attempts` acquisition attempts, sleeping per `backoff`
/// between them. Returns `None` if every attempt found the pool exhausted,
/// or immediately if the pool is not ready (retrying cannot open the
/// readiness gate, so there is no point waiting on it).
pub async fn acquire_with_backoff(
    pool: &ConnectivityPool,
    backoff: &BackoffStrategy,
    max_attempts: u32,
) -> Option<Arc<dyn Connection>> {
    if !pool.is_ready() {
        return None;
    }

    for attempt in 0..max_attempts {
        if let Some(conn) = pool.acquire().await {
            return Some(conn);
        }
        if attempt + 1 < max_attempts {
            let delay = backoff.delay_for(attempt);
            tracing::debug!(attempt, ?delay, "pool exhausted, backing off");
            tokio::time::sleep(delay).await;
        }
    }

    tracing::debug!(max_attempts, "giving up on acquisition after retries");
    None
}
