//! Retry delay schedule

use std::time::Duration;

/// Schedule of growing delays between acquisition retries.
///
/// The delay grows by `factor` per attempt (doubling by default) until it
/// hits the ceiling. With jitter enabled, every delay is shifted by a random
/// amount within a quarter of its length, so callers that backed off at the
/// same moment do not all wake together.
#[derive(Debug, Clone)]
pub struct BackoffStrategy {
    initial: Duration,
    ceiling: Duration,
    factor: f64,
    jitter: bool,
}

impl BackoffStrategy {
    /// Build a schedule from an initial delay and a ceiling, in milliseconds.
    ///
    /// The initial delay is raised to at least 1ms, and the ceiling to at
    /// least the initial delay.
    pub fn new(initial_ms: u64, max_ms: u64) -> Self {
        let initial_ms = initial_ms.max(1);
        Self {
            initial: Duration::from_millis(initial_ms),
            ceiling: Duration::from_millis(max_ms.max(initial_ms)),
            factor: 2.0,
            jitter: false,
        }
    }

    /// Change how fast delays grow.
    ///
    /// Values below 1.0 are clamped so the schedule never shrinks.
    pub fn with_multiplier(mut self, factor: f64) -> Self {
        self.factor = factor.max(1.0);
        self
    }

    /// Toggle jitter on the schedule.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Delay to sleep before the retry with the given zero-based attempt
    /// number.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let grown = self.initial.as_millis() as f64 * self.factor.powi(attempt as i32);
        let capped = grown.min(self.ceiling.as_millis() as f64) as u64;
        let millis = if self.jitter { spread(capped) } else { capped };
        Duration::from_millis(millis)
    }

    /// Get the initial delay.
    pub fn initial_delay(&self) -> Duration {
        self.initial
    }

    /// Get the delay ceiling.
    pub fn max_delay(&self) -> Duration {
        self.ceiling
    }

    /// Get the growth factor.
    pub fn multiplier(&self) -> f64 {
        self.factor
    }

    /// Check if jitter is enabled.
    pub fn has_jitter(&self) -> bool {
        self.jitter
    }
}

impl Default for BackoffStrategy {
    /// Default schedule: 100ms initial, 30 second ceiling, doubling
    fn default() -> Self {
        Self::new(100, 30_000)
    }
}

/// Shift a delay by a random amount within a quarter of its length.
fn spread(millis: u64) -> u64 {
    let span = millis / 4;
    if span == 0 {
        return millis;
    }
    let roll = clock_noise() % (span * 2 + 1);
    millis - span + roll
}

/// Cheap randomness from the subsecond clock, mixed with a wrapping
/// multiply. Only has to de-synchronize retry storms, nothing more.
fn clock_noise() -> u64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos() as u64;
    nanos.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
