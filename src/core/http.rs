//! Shared HTTP client with retry logic.

use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::backoff::{Backoff, Sleeper, TokioSleeper};
use super::error::LlmError;

/// Configuration for HTTP client resilience
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Total attempts per call, the first one included
    pub max_attempts: u32,
    /// Base duration for exponential backoff
    pub initial_retry_delay: Duration,
    /// Upper bound of the random jitter added to every delay
    pub max_jitter: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_attempts: 5,
            initial_retry_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(1000),
        }
    }
}

impl HttpClientConfig {
    pub fn backoff(&self) -> Backoff {
        Backoff::new(self.initial_retry_delay, self.max_jitter)
    }
}

/// Shared HTTP client with retry logic and exponential backoff.
pub struct HttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig, user_agent: Option<&str>) -> Result<Self, LlmError> {
        let default_ua = format!("askpanel/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let mut builder = reqwest::Client::builder().user_agent(ua);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
        })?;

        Ok(Self {
            client,
            config,
            sleeper: Arc::new(TokioSleeper),
        })
    }

    /// Replace the timer used between attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a POST request with JSON body and retry logic.
    ///
    /// Retries on transport failures, 429 and 5xx, waiting out the backoff between
    /// attempts. Any other error status ends the call after that single attempt.
    /// A budget of zero attempts is treated as one.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, query, headers, body),
        fields(url = %url)
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
        body: &Req,
        max_attempts: u32,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let attempts = max_attempts.max(1);
        let backoff = self.config.backoff();
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..attempts {
            match self.send_once(url, query, headers, body).await {
                Ok(response) => return Ok(response),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = attempts,
                        error = %e,
                        "transient failure"
                    );
                    last_error = Some(e);
                }
            }

            if attempt + 1 < attempts {
                let delay = backoff.delay(attempt);
                debug!(attempt = attempt + 1, ?delay, "backing off before retry");
                self.sleeper.sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Api {
            message: format!("Request failed after {attempts} attempts with unknown error"),
            status_code: 0,
        }))
    }

    async fn send_once<Req, Res>(
        &self,
        url: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let mut req_builder = self.client.post(url).query(query).json(body);
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| LlmError::Network {
            message: "Request failed".to_string(),
            source: Box::new(e),
        })?;

        let status = res.status();

        if !status.is_success() {
            // A body read failure must not change how the status is classified.
            let error_text = res
                .text()
                .await
                .ok()
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| status.to_string());

            return Err(LlmError::Api {
                message: error_text,
                status_code: status.as_u16(),
            });
        }

        debug!(status = %status, "HTTP request successful");

        let response_text = res.text().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        serde_json::from_str(&response_text).map_err(|e| LlmError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }
}
