//! Exponential backoff with jitter, and the seam the retry loop waits through.

use std::time::Duration;

use async_trait::async_trait;

/// Delay schedule between attempts.
///
/// For attempt index `i` (0-based) the delay is `2^i * base + uniform(0, max_jitter)`.
/// There is no upper cap; the attempt budget bounds the total wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub max_jitter: Duration,
}

impl Backoff {
    pub fn new(base: Duration, max_jitter: Duration) -> Self {
        Self { base, max_jitter }
    }

    /// Deterministic part of the delay for `attempt`.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor)
    }

    pub fn delay(&self, attempt: u32) -> Duration {
        let jitter = self.max_jitter.mul_f64(rand::random::<f64>());
        self.base_delay(attempt).saturating_add(jitter)
    }
}

/// Waits out a backoff delay.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
