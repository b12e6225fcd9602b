//! Status polling client
//!
//! Polls `/status/:blog_id` until the blog has a report. Successful polls
//! repeat at a fixed interval. Failed polls (transport errors, non-2xx
//! answers, unparsable bodies) wait an error delay that doubles with each
//! consecutive failure up to a ceiling; polling continues indefinitely unless
//! an attempt limit is set.

use std::time::Duration;

use daisy_common::config::PollConfig;
use daisy_common::db::BlogStatus;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Polling errors
#[derive(Debug, Error)]
pub enum PollError {
    #[error("No report after {attempts} status checks")]
    GaveUp { attempts: u32 },
}

/// Delay before the next poll after `consecutive_failures` failures in a row
///
/// # Examples
/// ```
/// use daisy_common::config::PollConfig;
/// use daisy_report::poll::error_backoff;
/// use std::time::Duration;
///
/// let config = PollConfig { interval_ms: 3000, error_delay_ms: 5000, max_error_delay_ms: 60_000 };
/// assert_eq!(error_backoff(&config, 1), Duration::from_millis(5000));
/// assert_eq!(error_backoff(&config, 2), Duration::from_millis(10_000));
/// assert_eq!(error_backoff(&config, 10), Duration::from_millis(60_000));
/// ```
pub fn error_backoff(config: &PollConfig, consecutive_failures: u32) -> Duration {
    let doublings = consecutive_failures.saturating_sub(1).min(32);
    let delay_ms = config
        .error_delay_ms
        .saturating_mul(1u64 << doublings)
        .min(config.max_error_delay_ms);
    Duration::from_millis(delay_ms)
}

/// Polls one blog's status endpoint
#[derive(Debug, Clone)]
pub struct StatusPoller {
    client: reqwest::Client,
    status_url: String,
    config: PollConfig,
    max_attempts: Option<u32>,
}

impl StatusPoller {
    /// `server` is the service base URL, e.g. `http://127.0.0.1:5730`
    pub fn new(server: &str, blog_id: i64, config: PollConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            status_url: format!("{}/status/{}", server.trim_end_matches('/'), blog_id),
            config,
            max_attempts: None,
        }
    }

    /// Stop after `attempts` status checks instead of polling forever
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    /// One status check
    pub async fn fetch_status(&self) -> Result<BlogStatus, reqwest::Error> {
        self.client
            .get(&self.status_url)
            .send()
            .await?
            .error_for_status()?
            .json::<BlogStatus>()
            .await
    }

    /// Poll until a report id is available
    pub async fn wait_for_report(&self) -> Result<i64, PollError> {
        let mut attempts: u32 = 0;
        let mut consecutive_failures: u32 = 0;

        loop {
            attempts += 1;

            let delay = match self.fetch_status().await {
                Ok(BlogStatus {
                    has_report: true,
                    report_id: Some(report_id),
                    post_count,
                }) => {
                    info!(report_id, post_count, attempts, "Report ready");
                    return Ok(report_id);
                }
                Ok(status) => {
                    consecutive_failures = 0;
                    debug!(
                        post_count = status.post_count,
                        attempts,
                        "Report not ready yet"
                    );
                    Duration::from_millis(self.config.interval_ms)
                }
                Err(e) => {
                    consecutive_failures += 1;
                    let delay = error_backoff(&self.config, consecutive_failures);
                    warn!(
                        url = %self.status_url,
                        consecutive_failures,
                        retry_in_ms = delay.as_millis() as u64,
                        "Status check failed: {}",
                        e
                    );
                    delay
                }
            };

            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(PollError::GaveUp { attempts });
            }

            tokio::time::sleep(delay).await;
        }
    }
}
