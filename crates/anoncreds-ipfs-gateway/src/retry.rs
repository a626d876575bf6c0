use std::{future::Future, time::Duration};

use backon::{ExponentialBuilder, Retryable};
use tokio::time::Instant;
use tracing::warn;

use crate::GatewayError;

/// Bounded exponential backoff for gateway requests.
///
/// `max_retries` counts total attempts. The n-th retry waits
/// `initial_delay * 2^(n - 1)`, without jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// `max_retries` is raised to 1 if zero.
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            initial_delay,
        }
    }

    /// Delay before the `retry`-th retry (1-based).
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_delay.saturating_mul(factor)
    }

    fn backoff(&self) -> ExponentialBuilder {
        let retries = self.max_retries.max(1) - 1;

        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_factor(2.0)
            .with_max_delay(self.delay(retries.max(1)))
            .with_max_times(retries as usize)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or
    /// attempts run out. The last error is returned on exhaustion.
    ///
    /// With a `deadline`, both requests and sleeps are abandoned once it
    /// passes.
    pub async fn run<T, F, Fut>(&self, deadline: Option<Instant>, op: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let retry = op
            .retry(self.backoff())
            .when(GatewayError::is_retryable)
            .notify(|err: &GatewayError, delay: Duration| {
                warn!(error = %err, delay_ms = delay.as_millis() as u64, "retrying gateway request");
            });

        match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, retry)
                .await
                .map_err(|_| GatewayError::DeadlineExceeded)?,
            None => retry.await,
        }
    }
}
