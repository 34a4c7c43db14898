use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("API error ({status_code}): {message}")]
    Api { message: String, status_code: u16 },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LlmError {
    /// Whether another attempt may succeed.
    ///
    /// Transport failures, 429 and 5xx are transient. Every other status, parse
    /// failures and configuration problems are fatal.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Network { .. } => true,
            LlmError::Api { status_code, .. } => StatusCode::from_u16(*status_code)
                .map(is_transient_status)
                .unwrap_or(false),
            LlmError::Parse { .. } | LlmError::ProviderConfiguration(_) => false,
        }
    }
}

pub(crate) fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status_code: u16) -> LlmError {
        LlmError::Api {
            message: "boom".to_string(),
            status_code,
        }
    }

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        assert!(api(429).is_retryable());
        assert!(api(500).is_retryable());
        assert!(api(503).is_retryable());
    }

    #[test]
    fn other_client_errors_are_fatal() {
        assert!(!api(400).is_retryable());
        assert!(!api(401).is_retryable());
        assert!(!api(404).is_retryable());
        assert!(!LlmError::ProviderConfiguration("missing key".into()).is_retryable());
    }

    #[test]
    fn parse_errors_are_not_retried() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LlmError::Parse {
            message: "bad body".to_string(),
            source: Box::new(source),
        };
        assert!(!err.is_retryable());
    }
}
