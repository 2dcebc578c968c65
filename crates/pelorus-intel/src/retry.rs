//! Transport retry for provider calls.
//!
//! Intelligence providers sit behind flaky links; a connection reset
//! should not cost a screening its data. [`retry_send`] retries transient
//! transport failures with doubling backoff and, once attempts are
//! exhausted, classifies the failure into the crate's endpoint-labelled
//! [`IntelError`] — `Timeout` for deadline overruns, `Http` for the rest.
//!
//! Anything that produced an HTTP response at all (including 4xx and 5xx)
//! is returned untouched: status interpretation, 403 included, belongs to
//! the client that knows the endpoint's contract.

use std::time::Duration;

use crate::error::IntelError;

/// Retries after the initial attempt.
const MAX_RETRIES: u32 = 3;

/// First backoff delay; doubles per retry (200ms, 400ms, 800ms).
const BASE_DELAY_MS: u64 = 200;

/// Classify an exhausted transport failure for `endpoint`.
fn transport_error(endpoint: &str, timeout_secs: u64, source: reqwest::Error) -> IntelError {
    if source.is_timeout() {
        IntelError::Timeout {
            endpoint: endpoint.to_string(),
            timeout_secs,
        }
    } else {
        IntelError::Http {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}

/// Send a provider request with backoff on transport failure.
///
/// `endpoint` is the label carried into the resulting [`IntelError`]
/// (and the retry logs); `timeout_secs` is the per-call deadline the
/// caller configured, reported on `Timeout`.
pub(crate) async fn retry_send<F, Fut>(
    endpoint: &str,
    timeout_secs: u64,
    f: F,
) -> Result<reqwest::Response, IntelError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut delay = Duration::from_millis(BASE_DELAY_MS);
    let mut attempts_left = MAX_RETRIES;
    loop {
        match f().await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempts_left == 0 => return Err(transport_error(endpoint, timeout_secs, e)),
            Err(e) => {
                tracing::warn!(
                    endpoint,
                    attempts_left,
                    "transient transport failure, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempts_left -= 1;
            }
        }
    }
}
