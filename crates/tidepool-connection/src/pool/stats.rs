//! Pool statistics types

use serde::{Deserialize, Serialize};

/// One consistent snapshot of the pool's collections, taken under the pool
/// lock.
///
/// Every tracked connection is either idle or checked out, so
/// `total == idle + checked_out` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Tracked connections (idle + checked out)
    total: usize,
    /// Connections sitting in the idle queue
    idle: usize,
    /// Connections currently lent to callers
    checked_out: usize,
}

impl PoolStats {
    /// Create new pool statistics
    pub fn new(total: usize, idle: usize, checked_out: usize) -> Self {
        Self {
            total,
            idle,
            checked_out,
        }
    }

    /// Get the total number of tracked connections
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get the number of idle connections
    pub fn idle(&self) -> usize {
        self.idle
    }

    /// Get the number of checked-out connections
    pub fn checked_out(&self) -> usize {
        self.checked_out
    }

    /// Fraction of tracked connections currently lent out, 0.0 to 1.0.
    ///
    /// An empty pool counts as idle rather than busy.
    pub fn utilization(&self) -> f64 {
        match self.total {
            0 => 0.0,
            total => self.checked_out as f64 / total as f64,
        }
    }

    /// True when the pool tracks connections but has none left to lend.
    ///
    /// The next `acquire` will either grow the pool or report exhaustion.
    pub fn is_exhausted(&self) -> bool {
        self.total > 0 && self.idle == 0
    }
}

impl Default for PoolStats {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}
