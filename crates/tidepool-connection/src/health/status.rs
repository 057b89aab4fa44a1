//! Latency-based health classification

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a connection's probe latency rates against the configured bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Probe latency within the healthy band
    #[default]
    Healthy,
    /// Responding, but slower than the healthy band allows
    Degraded,
    /// Probe failures, or latency beyond the degraded band
    Unhealthy,
}

impl HealthStatus {
    /// Rate a latency against the default bands (healthy up to 100ms,
    /// degraded up to 500ms).
    pub fn from_latency(latency: Duration) -> Self {
        HealthThresholds::default().classify(latency)
    }

    /// A degraded connection is still usable; an unhealthy one is not.
    pub fn is_usable(&self) -> bool {
        *self != HealthStatus::Unhealthy
    }

    /// Check if status is healthy.
    pub fn is_healthy(&self) -> bool {
        *self == HealthStatus::Healthy
    }
}

/// Latency bands for [`HealthStatus`] classification
#[derive(Debug, Clone)]
pub struct HealthThresholds {
    /// Latencies up to this are healthy
    pub healthy: Duration,
    /// Latencies up to this are degraded; anything slower is unhealthy
    pub degraded: Duration,
}

impl HealthThresholds {
    /// Build bands from millisecond limits.
    ///
    /// The degraded limit is raised to the healthy limit if it sits below it.
    pub fn new(healthy_ms: u64, degraded_ms: u64) -> Self {
        let healthy = Duration::from_millis(healthy_ms);
        Self {
            healthy,
            degraded: Duration::from_millis(degraded_ms).max(healthy),
        }
    }

    /// Rate a probe latency against these bands.
    pub fn classify(&self, latency: Duration) -> HealthStatus {
        if latency <= self.healthy {
            HealthStatus::Healthy
        } else if latency <= self.degraded {
            HealthStatus::Degraded
        } else {
            HealthStatus::Unhealthy
        }
    }
}

impl Default for HealthThresholds {
    /// Default bands: healthy up to 100ms, degraded up to 500ms
    fn default() -> Self {
        Self::new(100, 500)
    }
}
