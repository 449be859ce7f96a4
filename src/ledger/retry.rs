use std::future::Future;
use std::time::Duration;

use super::LedgerResult;

/// Bounded, flat-delay retry for idempotent ledger reads.
///
/// Attempts run sequentially; after each failure short of the budget the
/// policy sleeps the fixed delay and tries again, and once the budget is
/// exhausted the last error is surfaced unchanged. Worst-case latency is
/// `attempts * delay`. Write operations are never wrapped: resubmitting
/// a signed transaction risks double execution or a nonce conflict.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub async fn run<T, F, Fut>(&self, op: F) -> LedgerResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = LedgerResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.attempts => {
                    tracing::warn!(
                        "Attempt {} failed: {}. Retrying in {}ms...",
                        attempt,
                        err,
                        self.delay.as_millis()
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
