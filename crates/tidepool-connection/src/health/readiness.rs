//! Startup readiness polling

use std::time::Duration;

use crate::pool::ConnectivityPool;

/// Poll the pool's readiness gate until it opens or the deadline passes.
///
/// The pool's readiness is a startup-health snapshot set by `initialize`;
/// this helper is the polling loop a startup orchestrator runs before
/// allowing dependent services to start. Returns `true` as soon as the pool
/// reports ready, `false` once `timeout` has elapsed without that happening.
pub async fn wait_for_ready(
    pool: &ConnectivityPool,
    timeout: Duration,
    poll_interval: Duration,
) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        if pool.is_ready() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            tracing::warn!(?timeout, "pool did not become ready in time");
            return false;
        }
        tokio::time::sleep(poll_interval).await;
    }
}
