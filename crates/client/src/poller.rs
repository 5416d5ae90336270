//! Start-and-poll driver for asynchronous groupings jobs.
//!
//! An `*/async` endpoint answers with a [`JobHandle`]. The driver then
//! polls `GET /jobs/{handle}` until the job reports `COMPLETED` and
//! returns its `result`. Any failed request ends the sequence with that
//! error; no retries are attempted.

use std::sync::Arc;
use std::time::Duration;

use groupings_core::{endpoints, JobHandle, JobStatus};
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;
use crate::transport::{ApiRequest, Transport};

/// Tunable parameters of the polling loop.
///
/// The defaults poll every five seconds with no bound on attempts or
/// total time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between consecutive status polls.
    pub interval: Duration,
    /// Delay before the first status poll.
    pub initial_delay: Duration,
    /// Give up after this many status polls.
    pub max_attempts: Option<u32>,
    /// Give up once polling has taken this long.
    pub timeout: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            initial_delay: Duration::ZERO,
            max_attempts: None,
            timeout: None,
        }
    }
}

/// Runs asynchronous actions to completion.
///
/// Holds no per-job state; concurrent calls are independent.
#[derive(Clone)]
pub struct AsyncActionClient {
    transport: Arc<dyn Transport>,
    config: PollConfig,
}

impl AsyncActionClient {
    pub fn new(transport: Arc<dyn Transport>, config: PollConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Send `initiate`, then poll the returned job until it completes.
    ///
    /// Resolves with the job's `result` decoded as `R`, or with the first
    /// error encountered. A failed initiating request means no polls.
    pub async fn run_async_action<R>(&self, initiate: ApiRequest) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        self.run(initiate, None).await
    }

    /// Like [`run_async_action`](Self::run_async_action), but stops with
    /// [`ClientError::Cancelled`] once `cancel` fires.
    pub async fn run_async_action_until<R>(
        &self,
        initiate: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        self.run(initiate, Some(cancel)).await
    }

    async fn run<R>(
        &self,
        initiate: ApiRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let path = initiate.path.clone();
        let body = self.transport.send(initiate).await.inspect_err(|e| {
            tracing::warn!(path = %path, error = %e, "Failed to start asynchronous job");
        })?;
        let handle: JobHandle = serde_json::from_value(body)?;
        tracing::debug!(%handle, path = %path, "Asynchronous job started");

        let started = Instant::now();
        let mut attempts = 0u32;
        let outcome = match self.config.timeout {
            Some(timeout) => {
                let polled =
                    tokio::time::timeout(timeout, self.poll(&handle, &mut attempts, cancel)).await;
                match polled {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ClientError::PollLimit {
                        attempts,
                        elapsed: started.elapsed(),
                    }),
                }
            }
            None => self.poll(&handle, &mut attempts, cancel).await,
        };

        match &outcome {
            Ok(_) => tracing::info!(%handle, attempts, "Asynchronous job completed"),
            Err(e) => tracing::warn!(%handle, attempts, error = %e, "Asynchronous job failed"),
        }
        outcome
    }

    /// Poll until the job completes, counting requests in `attempts`.
    async fn poll<R>(
        &self,
        handle: &JobHandle,
        attempts: &mut u32,
        cancel: Option<&CancellationToken>,
    ) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let started = Instant::now();
        let mut delay = self.config.initial_delay;

        loop {
            if let Some(max) = self.config.max_attempts {
                if *attempts >= max {
                    return Err(ClientError::PollLimit {
                        attempts: *attempts,
                        elapsed: started.elapsed(),
                    });
                }
            }

            if !delay.is_zero() {
                wait(delay, cancel).await?;
            } else if cancel.is_some_and(CancellationToken::is_cancelled) {
                return Err(ClientError::Cancelled);
            }
            delay = self.config.interval;

            *attempts += 1;
            tracing::debug!(%handle, attempt = *attempts, "Polling job status");
            let body = self
                .transport
                .send(ApiRequest::get(endpoints::job_status(handle)))
                .await?;

            match serde_json::from_value::<JobStatus<R>>(body)? {
                JobStatus::InProgress => continue,
                JobStatus::Completed { result } => return Ok(result),
            }
        }
    }
}

/// Sleep for `delay`, returning early if `cancel` fires.
async fn wait(delay: Duration, cancel: Option<&CancellationToken>) -> Result<(), ClientError> {
    match cancel {
        Some(cancel) => {
            tokio::select! {
                _ = cancel.cancelled() => Err(ClientError::Cancelled),
                _ = tokio::time::sleep(delay) => Ok(()),
            }
        }
        None => {
            tokio::time::sleep(delay).await;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_polls_every_five_seconds_without_bound() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.initial_delay, Duration::ZERO);
        assert!(config.max_attempts.is_none());
        assert!(config.timeout.is_none());
    }

    #[tokio::test]
    async fn wait_without_token_sleeps() {
        assert!(wait(Duration::from_millis(1), None).await.is_ok());
    }

    #[tokio::test]
    async fn cancelled_token_stops_wait() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = wait(Duration::from_secs(3600), Some(&cancel)).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
    }
}
