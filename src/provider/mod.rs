pub(crate) mod constants;
pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};

use crate::core::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Gemini => write!(f, "Gemini"),
        }
    }
}

impl Provider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::Gemini => constants::gemini::API_KEY_ENV_VAR,
        }
    }
}

/// Where the API key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read the provider's default environment variable.
    Default,
    /// Use the given key as is.
    Custom(String),
}

impl ApiKey {
    pub fn resolve(&self, provider: Provider) -> Result<String, LlmError> {
        match self {
            ApiKey::Custom(key) => Ok(key.clone()),
            ApiKey::Default => {
                let var = provider.default_api_key_env_var();
                std::env::var(var)
                    .map_err(|_| LlmError::ProviderConfiguration(format!("{var} not set.")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_key_is_returned_verbatim() {
        let key = ApiKey::Custom("abc".to_string()).resolve(Provider::Gemini);
        assert_eq!(key.unwrap(), "abc");
    }

    #[test]
    fn gemini_reads_its_own_env_var() {
        assert_eq!(Provider::Gemini.default_api_key_env_var(), "GEMINI_API_KEY");
        assert_eq!(Provider::Gemini.to_string(), "Gemini");
    }
}
