//! Tests for acquisition retry

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tidepool_core::{Connection, Result, Row, TidepoolError, Value};
use uuid::Uuid;

use super::acquire::acquire_with_backoff;
use super::backoff::BackoffStrategy;
use crate::pool::{ConnectionFactory, ConnectivityPool, PoolConfig};

struct MockConnection {
    id: Uuid,
    connected: AtomicBool,
}

#[async_trait]
impl Connection for MockConnection {
    fn id(&self) -> Uuid {
        self.id
    }

    fn driver_name(&self) -> &str {
        "mock"
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn execute(&self, _query: &str, _params: &[Value]) -> Result<Vec<Row>> {
        if !self.is_connected() {
            return Err(TidepoolError::NotConnected);
        }
        Ok(Vec::new())
    }

    async fn close(&self) -> Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}

struct MockFactory;

#[async_trait]
impl ConnectionFactory for MockFactory {
    async fn create(&self) -> Arc<dyn Connection> {
        Arc::new(MockConnection {
            id: Uuid::new_v4(),
            connected: AtomicBool::new(true),
        })
    }
}

// =============================================================================
// Backoff strategy
// =============================================================================

#[test]
fn test_backoff_exponential_growth() {
    let backoff = BackoffStrategy::new(100, 30_000);
    assert_eq!(backoff.delay_for(0), Duration::from_millis(100));
    assert_eq!(backoff.delay_for(1), Duration::from_millis(200));
    assert_eq!(backoff.delay_for(2), Duration::from_millis(400));
}

#[test]
fn test_backoff_caps_at_max() {
    let backoff = BackoffStrategy::new(100, 30_000);
    assert_eq!(backoff.delay_for(20), Duration::from_millis(30_000));
}

#[test]
fn test_backoff_custom_multiplier() {
    let backoff = BackoffStrategy::new(100, 30_000).with_multiplier(3.0);
    assert_eq!(backoff.delay_for(1), Duration::from_millis(300));

    // Multiplier below 1.0 is clamped so delays never shrink.
    let clamped = BackoffStrategy::new(100, 30_000).with_multiplier(0.5);
    assert_eq!(clamped.multiplier(), 1.0);
}

#[test]
fn test_backoff_jitter_bounds() {
    let backoff = BackoffStrategy::new(1000, 30_000).with_jitter(true);
    assert!(backoff.has_jitter());

    for attempt in 0..4 {
        let base = (1000u64 * 2u64.pow(attempt)).min(30_000);
        let delay = backoff.delay_for(attempt).as_millis() as u64;
        assert!(delay >= base - base / 4);
        assert!(delay <= base + base / 4);
    }
}

#[test]
fn test_backoff_defaults() {
    let backoff = BackoffStrategy::default();
    assert_eq!(backoff.initial_delay(), Duration::from_millis(100));
    assert_eq!(backoff.max_delay(), Duration::from_millis(30_000));
    assert_eq!(backoff.multiplier(), 2.0);
    assert!(!backoff.has_jitter());
}

#[test]
fn test_backoff_zero_initial_is_clamped() {
    let backoff = BackoffStrategy::new(0, 10);
    assert_eq!(backoff.initial_delay(), Duration::from_millis(1));
}

// =============================================================================
// acquire_with_backoff
// =============================================================================

#[tokio::test]
async fn test_acquire_with_backoff_fast_path() {
    let pool = ConnectivityPool::new(PoolConfig::new(1, 2), MockFactory);
    pool.initialize().await;

    let backoff = BackoffStrategy::new(10, 100);
    let conn = acquire_with_backoff(&pool, &backoff, 3).await;
    assert!(conn.is_some());
}

#[tokio::test]
async fn test_acquire_with_backoff_not_ready() {
    let pool = ConnectivityPool::new(PoolConfig::new(1, 2), MockFactory);
    // Not initialized: retrying cannot help, so this returns straight away.
    let backoff = BackoffStrategy::new(10, 100);
    assert!(acquire_with_backoff(&pool, &backoff, 3).await.is_none());
}

#[tokio::test]
async fn test_acquire_with_backoff_gives_up() {
    let pool = ConnectivityPool::new(PoolConfig::new(1, 1), MockFactory);
    pool.initialize().await;

    let _held = pool.acquire().await.expect("drain the pool");

    let backoff = BackoffStrategy::new(5, 20);
    assert!(acquire_with_backoff(&pool, &backoff, 3).await.is_none());
}

#[tokio::test]
async fn test_acquire_with_backoff_succeeds_after_release() {
    let pool = Arc::new(ConnectivityPool::new(PoolConfig::new(1, 1), MockFactory));
    pool.initialize().await;

    let held = pool.acquire().await.expect("drain the pool");

    let releaser = pool.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        releaser.release(held).await;
    });

    let backoff = BackoffStrategy::new(20, 200);
    let conn = acquire_with_backoff(&pool, &backoff, 10).await;
    assert!(conn.is_some());
}
