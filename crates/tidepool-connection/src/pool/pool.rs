//! Connectivity pool implementation

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tidepool_core::Connection;
use uuid::Uuid;

use super::config::PoolConfig;
use super::stats::PoolStats;

/// Factory trait for creating new connections
///
/// `create` is fail-soft by contract: it never signals an error. A failed
/// establishment attempt yields a connection whose `is_connected()` is false,
/// leaving the replacement policy entirely to the pool.
#[async_trait]
pub trait ConnectionFactory: Send + Sync + 'static {
    /// Create a new connection, establishing the session eagerly
    async fn create(&self) -> Arc<dyn Connection>;
}

#[async_trait]
impl<T: ConnectionFactory> ConnectionFactory for Arc<T> {
    async fn create(&self) -> Arc<dyn Connection> {
        (**self).create().await
    }
}

/// The pool's two collections, guarded by one mutex.
///
/// Every tracked connection that is not in `idle` is checked out by exactly
/// one caller. `idle` only ever holds ids present in `tracked`.
struct PoolInner {
    tracked: HashMap<Uuid, Arc<dyn Connection>>,
    idle: VecDeque<Uuid>,
    /// Factory calls in flight; counted so concurrent growth cannot
    /// overshoot `max_connections` while the lock is released
    pending_creates: usize,
}

/// A bounded, self-healing pool of database connections.
///
/// The pool fills itself with `min_connections` connections at
/// initialization and reports ready only if all of them came up connected.
/// Callers check connections out with [`acquire`](Self::acquire) and hand
/// them back with [`release`](Self::release); a caller holding a broken
/// connection reports it via
/// [`report_connection_error`](Self::report_connection_error) instead.
///
/// `acquire` never blocks on pool state: exhaustion and not-ready are both
/// reported as `None`, which callers treat as backpressure (see
/// [`acquire_with_backoff`](crate::retry::acquire_with_backoff) for the
/// recommended retry policy). No fairness among contending callers is
/// promised.
///
/// Construct one instance at the composition root and share it as
/// `Arc<ConnectivityPool>`; the pool has no global state.
pub struct ConnectivityPool {
    config: PoolConfig,
    factory: Arc<dyn ConnectionFactory>,
    inner: Mutex<PoolInner>,
    /// Startup-health snapshot; set once by `initialize`, cleared by
    /// `shutdown`, never re-derived from live health
    ready: AtomicBool,
    initialized: AtomicBool,
    /// Set by `shutdown`; makes factory calls that were in flight while the
    /// pool drained discard their connection instead of tracking it
    shut_down: AtomicBool,
}

impl ConnectivityPool {
    /// Create a new, unfilled pool with the given configuration and factory
    pub fn new<F: ConnectionFactory>(config: PoolConfig, factory: F) -> Self {
        Self {
            config,
            factory: Arc::new(factory),
            inner: Mutex::new(PoolInner {
                tracked: HashMap::new(),
                idle: VecDeque::new(),
                pending_creates: 0,
            }),
            ready: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Fill the pool with `min_connections` connections and gate readiness.
    ///
    /// Each factory call is awaited to completion individually, so this
    /// blocks exactly as long as connection establishment takes. The pool
    /// becomes ready only if every one of the first `min_connections`
    /// connections reported connected; the application startup sequence is
    /// expected to poll [`is_ready`](Self::is_ready) before proceeding.
    ///
    /// Called once; subsequent calls are logged no-ops.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::warn!("pool already initialized, ignoring");
            return;
        }

        let quorum = self.config.min_connections();
        let mut connected = 0usize;
        for _ in 0..quorum {
            let conn = self.factory.create().await;
            let id = conn.id();
            let is_up = conn.is_connected();
            if is_up {
                connected += 1;
            } else {
                tracing::warn!(connection_id = %id, "initial connection failed to establish");
            }

            let mut inner = self.inner.lock();
            inner.tracked.insert(id, conn);
            if is_up {
                inner.idle.push_back(id);
            }
        }

        let ready = connected == quorum;
        self.ready.store(ready, Ordering::SeqCst);
        if ready {
            tracing::info!(connections = connected, "pool initialized and ready");
        } else {
            tracing::error!(
                connected = connected,
                required = quorum,
                "pool failed to reach readiness quorum"
            );
        }
    }

    /// Check out a connection.
    ///
    /// Returns `None` when the pool never reached readiness, or when it is
    /// exhausted (`max_connections` tracked and none idle). Otherwise returns
    /// an idle connection, or grows the pool by one. A freshly created
    /// connection is returned even if its establishment failed; the caller
    /// detects this through `execute` errors and reports back.
    pub async fn acquire(&self) -> Option<Arc<dyn Connection>> {
        if !self.is_ready() {
            tracing::debug!("acquire refused, pool is not ready");
            return None;
        }

        {
            let mut inner = self.inner.lock();
            while let Some(id) = inner.idle.pop_front() {
                if let Some(conn) = inner.tracked.get(&id) {
                    tracing::trace!(connection_id = %id, "lending idle connection");
                    return Some(conn.clone());
                }
                // stale idle entry for a connection removed elsewhere
            }

            if inner.tracked.len() + inner.pending_creates >= self.config.max_connections() {
                tracing::debug!("acquire refused, pool exhausted");
                return None;
            }
            inner.pending_creates += 1;
        }

        // Grow outside the lock; establishment may be slow.
        let conn = self.factory.create().await;
        let id = conn.id();

        let discarded = {
            let mut inner = self.inner.lock();
            inner.pending_creates -= 1;
            if self.shut_down.load(Ordering::SeqCst) {
                true
            } else {
                inner.tracked.insert(id, conn.clone());
                tracing::debug!(connection_id = %id, total = inner.tracked.len(), "pool grown");
                false
            }
        };

        if discarded {
            // Shutdown drained the pool while this create was in flight.
            tracing::debug!(connection_id = %id, "pool shut down during growth, discarding");
            let _ = conn.close().await;
            return None;
        }
        Some(conn)
    }

    /// Return a checked-out connection to the pool.
    ///
    /// A connected connection goes back to the idle queue. A disconnected one
    /// is dropped from tracking and closed; if that leaves the pool below its
    /// quorum, one replacement is created on the spot. This lazy path is the
    /// pool's only healing mechanism: there is no background sweep.
    pub async fn release(&self, conn: Arc<dyn Connection>) {
        let id = conn.id();

        if conn.is_connected() {
            let mut inner = self.inner.lock();
            if !inner.tracked.contains_key(&id) {
                // Releasing a connection the pool never issued is a caller
                // bug, not a pool state.
                tracing::warn!(connection_id = %id, "released connection is not tracked, ignoring");
                debug_assert!(false, "released connection is not tracked");
                return;
            }
            if !inner.idle.contains(&id) {
                inner.idle.push_back(id);
            }
            return;
        }

        tracing::debug!(connection_id = %id, "released connection is dead, removing");
        let below_quorum = {
            let mut inner = self.inner.lock();
            if inner.tracked.remove(&id).is_none() {
                tracing::warn!(connection_id = %id, "released connection is not tracked, ignoring");
                debug_assert!(false, "released connection is not tracked");
                return;
            }
            inner.idle.retain(|i| *i != id);
            inner.tracked.len() + inner.pending_creates < self.config.min_connections()
        };

        let _ = conn.close().await;

        if below_quorum {
            self.add_replacement().await;
        }
    }

    /// Out-of-band signal that a checked-out connection is broken.
    ///
    /// Distinct from `release`: the caller still nominally owns the
    /// connection, but a query failed for reasons attributable to the
    /// connection rather than the statement. The connection is dropped from
    /// tracking unconditionally, closed, and replaced immediately.
    pub async fn report_connection_error(&self, conn: Arc<dyn Connection>) {
        let id = conn.id();
        tracing::warn!(connection_id = %id, "connection reported broken by caller");

        {
            let mut inner = self.inner.lock();
            if inner.tracked.remove(&id).is_none() {
                // Reporting a connection the pool never issued is a caller
                // bug; replacing it would grow the pool for a stranger.
                tracing::warn!(connection_id = %id, "reported connection is not tracked, ignoring");
                debug_assert!(false, "reported connection is not tracked");
                return;
            }
            inner.idle.retain(|i| *i != id);
        }

        let _ = conn.close().await;
        self.add_replacement().await;
    }

    /// Create one replacement connection and insert it.
    ///
    /// The replacement always enters tracking, but joins the idle queue only
    /// if it actually came up connected. Skipped when concurrent growth has
    /// already taken the pool to its cap.
    async fn add_replacement(&self) {
        {
            let mut inner = self.inner.lock();
            if inner.tracked.len() + inner.pending_creates >= self.config.max_connections() {
                tracing::debug!("replacement skipped, pool already at capacity");
                return;
            }
            inner.pending_creates += 1;
        }

        let conn = self.factory.create().await;
        let id = conn.id();
        let is_up = conn.is_connected();

        let discarded = {
            let mut inner = self.inner.lock();
            inner.pending_creates -= 1;
            if self.shut_down.load(Ordering::SeqCst) {
                true
            } else {
                inner.tracked.insert(id, conn.clone());
                if is_up {
                    inner.idle.push_back(id);
                    tracing::debug!(connection_id = %id, "replacement connection added");
                } else {
                    tracing::warn!(connection_id = %id, "replacement connection failed to establish");
                }
                false
            }
        };

        if discarded {
            tracing::debug!(connection_id = %id, "pool shut down during replacement, discarding");
            let _ = conn.close().await;
        }
    }

    /// Number of tracked connections, or 0 if the pool is not ready.
    ///
    /// Intentionally conflates "not ready" with "empty" so that callers can
    /// use the size as a coarse health signal.
    pub fn pool_size(&self) -> usize {
        if !self.is_ready() {
            return 0;
        }
        self.inner.lock().tracked.len()
    }

    /// The startup-health snapshot: whether all initial connections came up
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Get a consistent snapshot of pool statistics
    pub fn stats(&self) -> PoolStats {
        let inner = self.inner.lock();
        let total = inner.tracked.len();
        let idle = inner.idle.len();
        PoolStats::new(total, idle, total - idle)
    }

    /// Get the pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Close every tracked connection and clear the pool.
    ///
    /// Idempotent; the pool reports not-ready and size 0 afterwards. Factory
    /// calls still in flight when the pool drains close their connection on
    /// completion instead of tracking it.
    pub async fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
        self.ready.store(false, Ordering::SeqCst);

        let drained: Vec<Arc<dyn Connection>> = {
            let mut inner = self.inner.lock();
            inner.idle.clear();
            inner.tracked.drain().map(|(_, conn)| conn).collect()
        };

        let count = drained.len();
        for conn in drained {
            let _ = conn.close().await;
        }
        if count > 0 {
            tracing::info!(closed = count, "pool shut down");
        }
    }
}
