//! Randomized exponential backoff for synchronous completion calls.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use llmbatch_protocols::error::ProviderError;

/// Retry policy for completion calls.
///
/// Every failure is retried; distinguishing structural from transient
/// errors is the caller's job (the template layer fails fast on rendering
/// problems before any call is made).
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Upper bound of the first randomized wait.
    pub base_delay: Duration,
    /// Cap on any single wait.
    pub max_delay: Duration,
    /// Randomize each wait over `[0, bound]` instead of sleeping the bound.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Wait before retrying after the given zero-based attempt: a random
    /// duration up to `min(max_delay, base_delay * 2^attempt)`, never below
    /// `base_delay` so consecutive attempts cannot fire back to back.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let bound = self.base_delay.as_millis() as f64 * 2f64.powi(attempt as i32);
        let bound = bound.min(self.max_delay.as_millis() as f64);

        let millis = if self.jitter {
            let base = self.base_delay.as_millis() as f64;
            (base + rand_unit() * (bound - base).max(0.0)) as u64
        } else {
            bound as u64
        };

        Duration::from_millis(millis)
    }
}

/// Pseudo-random value in `[0, 1)` derived from the clock's sub-second
/// nanoseconds. Good enough for backoff jitter.
fn rand_unit() -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    nanos as f64 / (u32::MAX as f64 + 1.0)
}

/// Run `operation` until it succeeds or the attempt budget is exhausted,
/// sleeping a jittered exponential delay between attempts. The final error
/// is returned to the caller once the budget runs out.
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, operation: F) -> Result<T, ProviderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut last_error = None;

    for attempt in 0..config.max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if attempt + 1 == config.max_attempts {
                    return Err(e);
                }

                let delay = config.delay_for_attempt(attempt);
                warn!(
                    "Completion call failed (attempt {}/{}): {}, retrying in {:?}",
                    attempt + 1,
                    config.max_attempts,
                    e,
                    delay
                );

                last_error = Some(e);
                sleep(delay).await;
            }
        }
    }

    Err(last_error.unwrap_or_else(|| ProviderError::Network("retry budget exhausted".to_string())))
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
