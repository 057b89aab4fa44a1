//! Pool configuration types

use serde::{Deserialize, Serialize};
use tidepool_core::{Result, TidepoolError};

/// Configuration for a connectivity pool
///
/// Controls how many connections the pool maintains and how far it may grow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of connections created at initialization; also the quorum
    /// required for the pool to report ready
    min_connections: usize,
    /// Hard cap on tracked connections
    max_connections: usize,
}

impl PoolConfig {
    /// Create a new pool configuration with the given minimum and maximum sizes
    ///
    /// # Panics
    ///
    /// Panics if `min_connections > max_connections` or if `max_connections` is 0.
    pub fn new(min_connections: usize, max_connections: usize) -> Self {
        assert!(
            max_connections > 0,
            "max_connections must be greater than 0, got {}",
            max_connections
        );
        assert!(
            min_connections <= max_connections,
            "min_connections ({}) cannot exceed max_connections ({})",
            min_connections,
            max_connections
        );

        Self {
            min_connections,
            max_connections,
        }
    }

    /// Get the minimum pool size (readiness quorum)
    pub fn min_connections(&self) -> usize {
        self.min_connections
    }

    /// Get the maximum pool size
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Load pool sizing from `TIDEPOOL_POOL_MIN` / `TIDEPOOL_POOL_MAX`.
    ///
    /// Both are optional; defaults are the same as [`PoolConfig::default`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let parse = |key: &str, default: usize| -> Result<usize> {
            match lookup(key) {
                Some(raw) => raw
                    .parse::<usize>()
                    .map_err(|_| TidepoolError::Configuration(format!("Invalid {}: {}", key, raw))),
                None => Ok(default),
            }
        };

        let defaults = Self::default();
        let min = parse("TIDEPOOL_POOL_MIN", defaults.min_connections)?;
        let max = parse("TIDEPOOL_POOL_MAX", defaults.max_connections)?;
        if max == 0 {
            return Err(TidepoolError::Configuration(
                "TIDEPOOL_POOL_MAX must be greater than 0".into(),
            ));
        }
        if min > max {
            return Err(TidepoolError::Configuration(format!(
                "TIDEPOOL_POOL_MIN ({}) cannot exceed TIDEPOOL_POOL_MAX ({})",
                min, max
            )));
        }
        Ok(Self {
            min_connections: min,
            max_connections: max,
        })
    }
}

impl Default for PoolConfig {
    /// Create a default pool configuration
    ///
    /// Defaults:
    /// - min_connections: 1
    /// - max_connections: 10
    fn default() -> Self {
        Self::new(1, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<String, String> = [
            ("TIDEPOOL_POOL_MIN".to_string(), "3".to_string()),
            ("TIDEPOOL_POOL_MAX".to_string(), "12".to_string()),
        ]
        .into();
        let config = PoolConfig::from_lookup(|k| vars.get(k).cloned()).expect("load");
        assert_eq!(config.min_connections(), 3);
        assert_eq!(config.max_connections(), 12);
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = PoolConfig::from_lookup(|_| None).expect("load");
        assert_eq!(config.min_connections(), 1);
        assert_eq!(config.max_connections(), 10);
    }

    #[test]
    fn test_from_lookup_min_exceeds_max() {
        let vars: HashMap<String, String> = [
            ("TIDEPOOL_POOL_MIN".to_string(), "5".to_string()),
            ("TIDEPOOL_POOL_MAX".to_string(), "2".to_string()),
        ]
        .into();
        let err = PoolConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("cannot exceed"));
    }
}
