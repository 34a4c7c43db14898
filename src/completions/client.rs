//! Retrying completion client for single-turn, prompt-in text-out APIs.
//!
//! The client never fails past [`CompletionClient::complete`]: transport and
//! HTTP failures collapse into [`COMMUNICATION_ERROR_FALLBACK`], an unusable
//! success body into [`NO_RESPONSE_FALLBACK`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Provider,
    core::{HttpClient, HttpClientConfig, LlmError, Sleeper, TextCompleter},
};

/// Returned when the remote service could not be reached or refused the call.
pub const COMMUNICATION_ERROR_FALLBACK: &str =
    "communication error — check connectivity and retry.";

/// Returned when the service answered but the answer carried no text.
pub const NO_RESPONSE_FALLBACK: &str = "unable to obtain a response — try again.";

/// Configuration trait for completion-style providers.
///
/// Each provider supplies its endpoint, credentials and the mapping between a
/// prompt and its native wire format.
pub trait CompletionProviderConfig: Send + Sync {
    /// The provider-specific request type
    type Request: Serialize + Send + Sync;
    /// The provider-specific response type
    type Response: DeserializeOwned + Send;

    /// Get the provider type
    fn provider(&self) -> Provider;

    /// Get the base URL for the API
    fn base_url(&self) -> &str;

    /// Get the API endpoint, relative to the base URL
    fn endpoint(&self) -> String;

    /// Query parameters carrying credentials, if the provider authenticates that way
    fn auth_query(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Get additional headers to include with each request
    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Get the HTTP client configuration
    fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::default()
    }

    /// Get the user agent string
    fn user_agent(&self) -> String {
        format!("askpanel/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Wrap a prompt as the sole user turn of a fresh request.
    fn build_request(&self, prompt: &str) -> Self::Request;

    /// Pull the answer text out of a response, if there is one.
    fn extract_text(&self, response: Self::Response) -> Option<String>;
}

/// Generic client for completion-style providers.
pub struct CompletionClient<P: CompletionProviderConfig> {
    pub config: P,
    http: HttpClient,
}

impl<P: CompletionProviderConfig> CompletionClient<P> {
    /// Create a new completion client with the given configuration.
    pub fn new(config: P) -> Result<Self, LlmError> {
        let http_config = config.http_config();
        let user_agent = config.user_agent();

        let http = HttpClient::new(http_config, Some(&user_agent))?;

        Ok(Self { config, http })
    }

    /// Replace the timer used between attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.http = self.http.with_sleeper(sleeper);
        self
    }

    /// Default attempt budget, taken from the HTTP configuration.
    pub fn max_attempts(&self) -> u32 {
        self.http.config().max_attempts
    }

    /// Ask with the default attempt budget.
    pub async fn complete(&self, prompt: &str) -> String {
        self.complete_with_attempts(prompt, self.max_attempts()).await
    }

    /// Ask with an explicit attempt budget. Always resolves to displayable text.
    pub async fn complete_with_attempts(&self, prompt: &str, max_attempts: u32) -> String {
        match self.try_complete(prompt, max_attempts).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(provider = %self.config.provider(), "response carried no text");
                NO_RESPONSE_FALLBACK.to_string()
            }
            Err(LlmError::Parse { message, source }) => {
                tracing::warn!(%message, error = %source, "unreadable response body");
                NO_RESPONSE_FALLBACK.to_string()
            }
            Err(e) => {
                tracing::error!(
                    provider = %self.config.provider(),
                    error = %e,
                    "completion failed"
                );
                COMMUNICATION_ERROR_FALLBACK.to_string()
            }
        }
    }

    /// Fallible form of [`complete_with_attempts`](Self::complete_with_attempts).
    ///
    /// `Ok(None)` means the call succeeded but the response held no answer text.
    #[tracing::instrument(
        name = "completion_request",
        skip(self, prompt),
        fields(provider = %self.config.provider(), endpoint = %self.config.endpoint())
    )]
    pub async fn try_complete(
        &self,
        prompt: &str,
        max_attempts: u32,
    ) -> Result<Option<String>, LlmError> {
        let url = format!("{}{}", self.config.base_url(), self.config.endpoint());
        let request = self.config.build_request(prompt);

        let response: P::Response = self
            .http
            .post_json(
                &url,
                &self.config.auth_query(),
                &self.config.extra_headers(),
                &request,
                max_attempts,
            )
            .await?;

        Ok(self.config.extract_text(response))
    }
}

#[async_trait]
impl<P: CompletionProviderConfig> TextCompleter for CompletionClient<P> {
    async fn complete(&self, prompt: &str) -> String {
        CompletionClient::complete(self, prompt).await
    }
}
