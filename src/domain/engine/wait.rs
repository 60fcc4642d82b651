// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::shared::error::{ProviderError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Outcome of a single poll check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T = ()> {
    /// Finished, carrying whatever the final check observed.
    Done(T),
    /// Not there yet; the text says what is still outstanding.
    Pending(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl PollSettings {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

/// Run `probe` until it reports [`Probe::Done`] and return its payload.
///
/// A zero timeout performs exactly one check and never sleeps. Otherwise the
/// probe is retried every `poll_interval` until the wall-clock time since the
/// first check exceeds the timeout, which yields [`ProviderError::Timeout`].
/// The last sleep is cut short so the final check lands on the deadline.
/// Errors from the probe end the wait immediately.
pub async fn poll_until<T, F, Fut>(what: &str, settings: PollSettings, mut probe: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Probe<T>>>,
{
    let started = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        let outstanding = match probe().await? {
            Probe::Done(value) => {
                debug!(
                    what,
                    attempts,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "wait finished"
                );
                return Ok(value);
            }
            Probe::Pending(outstanding) => outstanding,
        };

        let elapsed = started.elapsed();
        if settings.timeout.is_zero() || elapsed >= settings.timeout {
            return Err(ProviderError::Timeout(format!(
                "{} did not complete within {:?} after {} check(s): {}",
                what, settings.timeout, attempts, outstanding
            )));
        }

        debug!(
            what,
            attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            outstanding = %outstanding,
            "still waiting"
        );
        sleep(settings.poll_interval.min(settings.timeout - elapsed)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn settings(timeout_ms: u64, interval_ms: u64) -> PollSettings {
        PollSettings::new(
            Duration::from_millis(timeout_ms),
            Duration::from_millis(interval_ms),
        )
    }

    #[tokio::test]
    async fn test_zero_timeout_checks_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<()> = poll_until("object removal", settings(0, 10), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Probe::Pending("still present".to_string()))
            }
        })
        .await;

        assert!(result.unwrap_err().is_timeout());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_timeout_success_on_first_check() {
        let value = poll_until("object removal", settings(0, 10), || async { Ok(Probe::Done("gone")) })
            .await
            .unwrap();
        assert_eq!(value, "gone");
    }

    #[tokio::test]
    async fn test_finishes_once_probe_is_done() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let seen = poll_until("object removal", settings(2_000, 10), || {
            let counter = counter.clone();
            async move {
                let seen = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if seen < 3 {
                    Ok(Probe::Pending("still present".to_string()))
                } else {
                    Ok(Probe::Done(seen))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(seen, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_times_out_when_never_done() {
        let started = std::time::Instant::now();
        let err = poll_until::<(), _, _>("object removal", settings(50, 10), || async {
            Ok(Probe::Pending("still present".to_string()))
        })
        .await
        .unwrap_err();

        assert!(err.is_timeout());
        assert!(err.to_string().contains("still present"));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_probe_errors_abort_the_wait() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let err = poll_until("object removal", settings(5_000, 10), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<Probe, _>(ProviderError::Api {
                    verb: "get",
                    code: 403,
                    message: "forbidden".to_string(),
                })
            }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, ProviderError::Api { code: 403, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_last_sleep_stops_at_the_deadline() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = std::time::Instant::now();

        let err = poll_until::<(), _, _>("object removal", settings(50, 5_000), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Probe::Pending("still present".to_string()))
            }
        })
        .await
        .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(started.elapsed() >= Duration::from_millis(50));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
