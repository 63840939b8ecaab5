//! Retry with capped exponential backoff for mirror calls.

use crate::config::SyncConfig;
use crate::errors::AppResult;
use std::thread;
use std::time::Duration;

/// Configuration for retry behavior on failed mirror calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl From<&SyncConfig> for RetryConfig {
    fn from(cfg: &SyncConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: Duration::from_millis(cfg.base_delay_ms),
            max_delay: Duration::from_millis(cfg.max_delay_ms),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `retry` (1-based): base × 2^(retry-1), capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `op` until it succeeds or the attempts are used up.
/// Returns the last result together with the number of attempts made.
pub fn retry_with_backoff<T, F>(cfg: &RetryConfig, mut op: F) -> (AppResult<T>, u32)
where
    F: FnMut() -> AppResult<T>,
{
    let max = cfg.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Ok(v) => return (Ok(v), attempt),
            Err(e) if attempt >= max => return (Err(e), attempt),
            Err(_) => {
                thread::sleep(cfg.delay_for(attempt));
                attempt += 1;
            }
        }
    }
}
