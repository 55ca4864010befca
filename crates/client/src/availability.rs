use std::io::Write;
use std::time::Duration;

use common::Health;
use configs::ClientConfig;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

use crate::api::ProductApi;
use crate::error_log::ErrorLog;
use crate::errors::{ClientError, TransportError};

/// Bounded, fixed-delay retry budget for the startup health check.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` counts every health check, the first one included; it
    /// is never less than one.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self::new(cfg.max_retries, Duration::from_secs(cfg.retry_delay_secs))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether another attempt is allowed after `attempts` failed ones.
    pub fn should_retry(&self, attempts: u32) -> bool {
        if attempts >= self.max_attempts {
            debug!("Max retry attempts ({}) reached", self.max_attempts);
            return false;
        }
        true
    }

    pub async fn wait_before_retry(&self, attempt: u32) {
        debug!("Retrying in {:?} (attempt {})", self.delay, attempt + 1);
        sleep(self.delay).await;
    }
}

#[derive(Debug, Error)]
#[error("service unavailable after {attempts} attempts: {last}")]
pub struct Unavailable {
    pub attempts: u32,
    pub last: TransportError,
}

async fn check<A: ProductApi + ?Sized>(api: &A) -> Result<Health, TransportError> {
    let health = api.health().await?;
    if !health.is_up() {
        return Err(TransportError::Unhealthy {
            url: api.base_url().to_string(),
            status: health.status,
        });
    }
    Ok(health)
}

/// Poll the health endpoint until it reports `up` or the retry budget is
/// spent. Every failed attempt is reported on `out` and recorded in `log`.
/// Console output is best effort: a broken terminal does not change the
/// outcome.
pub async fn wait_until_available<A, W>(
    api: &A,
    policy: &RetryPolicy,
    log: &ErrorLog,
    out: &mut W,
) -> Result<Health, Unavailable>
where
    A: ProductApi + ?Sized,
    W: Write,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match check(api).await {
            Ok(health) => {
                if attempts > 1 {
                    debug!("Service answered after {} attempts", attempts);
                }
                let _ = writeln!(out, "API is available at {}", api.base_url());
                return Ok(health);
            }
            Err(error) => {
                debug!(attempt = attempts, error = %error, "health check failed");
                let _ = writeln!(out, "API is not available. Error: {error}");
                log.record(&ClientError::Transport(error.clone()));

                if !policy.should_retry(attempts) {
                    let _ = writeln!(out, "API is not available after several attempts. Exiting program.");
                    return Err(Unavailable { attempts, last: error });
                }
                let _ = writeln!(out, "Retrying ({}/{})...", attempts, policy.max_attempts());
                policy.wait_before_retry(attempts).await;
            }
        }
    }
}
