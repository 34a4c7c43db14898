//! Google Gemini `generateContent` provider.

use serde::{Deserialize, Serialize};

use crate::completions::{CompletionClient, CompletionProviderConfig};
use crate::core::{HttpClientConfig, LlmError};
use crate::provider::constants::gemini;
use crate::provider::{ApiKey, Provider};

pub type GeminiClient = CompletionClient<GeminiConfig>;

/// Gemini-specific configuration for the completion client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub http_config: HttpClientConfig,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: gemini::API_BASE.to_string(),
            model: gemini::DEFAULT_MODEL.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    /// Build a config from the hosting environment.
    ///
    /// The key comes from `GEMINI_API_KEY`; `GEMINI_MODEL` and `GEMINI_API_BASE`
    /// override the defaults when set.
    pub fn from_env() -> Result<Self, LlmError> {
        let mut config = Self::new(ApiKey::Default.resolve(Provider::Gemini)?);

        if let Ok(model) = std::env::var(gemini::MODEL_ENV_VAR) {
            config = config.with_model(model);
        }
        if let Ok(base_url) = std::env::var(gemini::API_BASE_ENV_VAR) {
            config = config.with_base_url(base_url);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }
}

impl CompletionProviderConfig for GeminiConfig {
    type Request = Request;
    type Response = Response;

    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("/v1beta/models/{}:generateContent", self.model)
    }

    fn auth_query(&self) -> Vec<(String, String)> {
        vec![("key".to_string(), self.api_key.clone())]
    }

    fn http_config(&self) -> HttpClientConfig {
        self.http_config.clone()
    }

    fn build_request(&self, prompt: &str) -> Request {
        Request {
            contents: vec![Content {
                role: Some(Role::User),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }

    fn extract_text(&self, response: Response) -> Option<String> {
        if response.candidates.is_empty() {
            if let Some(reason) = response
                .prompt_feedback
                .as_ref()
                .and_then(|feedback| feedback.block_reason.as_deref())
            {
                tracing::debug!(block_reason = reason, "prompt was blocked");
            }
        }

        response
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> GeminiConfig {
        GeminiConfig::new("test-key".to_string())
    }

    fn parse(value: serde_json::Value) -> Response {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_wraps_prompt_as_single_user_turn() {
        let request = config().build_request("How long is the course?");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": "How long is the course?" }]
                }]
            })
        );
    }

    #[test]
    fn endpoint_targets_configured_model() {
        let config = config().with_model("gemini-2.0-flash".to_string());
        assert_eq!(
            config.endpoint(),
            "/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(
            config.auth_query(),
            vec![("key".to_string(), "test-key".to_string())]
        );
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = config().with_base_url("http://127.0.0.1:8080/".to_string());
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn extracts_first_part_of_first_candidate() {
        let response = parse(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "role": "model", "parts": [{ "text": "other" }] } }
            ]
        }));
        assert_eq!(config().extract_text(response), Some("first".to_string()));
    }

    #[test]
    fn missing_pieces_yield_no_text() {
        let cases = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "functionCall": {} }] } }] }),
            json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
        ];

        for case in cases {
            let response = parse(case.clone());
            assert_eq!(config().extract_text(response), None, "case: {case}");
        }
    }
}
