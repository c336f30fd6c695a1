//! LLM configuration from environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default OpenAI-compatible base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for text completions.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo-1106";

/// Default model for requests carrying images.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";

/// Default upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Which provider implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Fake,
}

/// LLM client configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    /// API key; only required for the OpenAI provider.
    pub api_key: Option<String>,
    /// Base URL for the API, without a trailing slash.
    pub base_url: String,
    pub chat_model: String,
    pub vision_model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PANTRY_LLM_PROVIDER`: "openai" (default) or "fake"
    /// - `OPENAI_API_KEY`: required for "openai"
    /// - `PANTRY_LLM_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    /// - `PANTRY_CHAT_MODEL`: text model (default: "gpt-3.5-turbo-1106")
    /// - `PANTRY_VISION_MODEL`: image model (default: "gpt-4o-mini")
    /// - `PANTRY_LLM_TIMEOUT_SECS`: request timeout (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let provider = match lookup("PANTRY_LLM_PROVIDER").as_deref() {
            None | Some("openai") => ProviderKind::OpenAi,
            Some("fake") => ProviderKind::Fake,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "PANTRY_LLM_PROVIDER".to_string(),
                    value: other.to_string(),
                })
            }
        };

        let api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        if provider == ProviderKind::OpenAi && api_key.is_none() {
            return Err(ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));
        }

        let base_url = lookup("PANTRY_LLM_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let chat_model =
            lookup("PANTRY_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());
        let vision_model =
            lookup("PANTRY_VISION_MODEL").unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string());

        let timeout_secs = match lookup("PANTRY_LLM_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PANTRY_LLM_TIMEOUT_SECS".to_string(),
                value: v,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            api_key,
            base_url,
            chat_model,
            vision_model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_openai_defaults() {
        let config = LlmConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.vision_model, DEFAULT_VISION_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_openai_requires_key() {
        let err = LlmConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));
    }

    #[test]
    fn test_fake_needs_no_key() {
        let config =
            LlmConfig::from_lookup(lookup_from(&[("PANTRY_LLM_PROVIDER", "fake")])).unwrap();
        assert_eq!(config.provider, ProviderKind::Fake);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = LlmConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PANTRY_LLM_BASE_URL", "http://localhost:8080/v1/"),
            ("PANTRY_CHAT_MODEL", "gpt-4o"),
            ("PANTRY_LLM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.chat_model, "gpt-4o");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_unknown_provider_and_bad_timeout() {
        assert!(matches!(
            LlmConfig::from_lookup(lookup_from(&[("PANTRY_LLM_PROVIDER", "claude")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            LlmConfig::from_lookup(lookup_from(&[
                ("PANTRY_LLM_PROVIDER", "fake"),
                ("PANTRY_LLM_TIMEOUT_SECS", "soon"),
            ])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
