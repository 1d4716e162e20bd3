//! Provider selection and connection settings.

use serde::{Deserialize, Serialize};

/// Model used when a stage does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Supported model providers.
///
/// # Examples
///
/// ```
/// use animatic_models::ModelProvider;
/// use std::str::FromStr;
///
/// assert_eq!(ModelProvider::from_str("google").unwrap(), ModelProvider::Google);
/// assert_eq!(ModelProvider::default(), ModelProvider::OpenRouter);
/// assert_eq!(ModelProvider::Google.default_api_key_env(), "GOOGLE_API_KEY");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModelProvider {
    /// OpenRouter aggregation service
    #[default]
    OpenRouter,
    /// Google Gemini through its OpenAI-compatible endpoint
    Google,
}

impl ModelProvider {
    /// Chat-completions endpoint for this provider.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ModelProvider::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
            ModelProvider::Google => {
                "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
            }
        }
    }

    /// Environment variable holding the API key.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ModelProvider::OpenRouter => "OPENROUTER_API_KEY",
            ModelProvider::Google => "GOOGLE_API_KEY",
        }
    }
}

/// Connection settings shared by every stage model of one pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ProviderSettings {
    /// Which provider to talk to.
    #[serde(default)]
    kind: ModelProvider,

    /// Endpoint override.
    #[serde(default)]
    base_url: Option<String>,

    /// API key environment variable override.
    #[serde(default)]
    api_key_env: Option<String>,

    /// HTTP(S) proxy URL.
    #[serde(default)]
    proxy: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Retry attempts for transient failures (0 disables retry).
    #[serde(default = "default_max_retries")]
    max_retries: usize,

    /// Initial retry backoff in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    retry_backoff_ms: u64,

    /// Sampling temperature sent with every request.
    #[serde(default)]
    temperature: Option<f32>,
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_backoff_ms() -> u64 {
    2000
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ModelProvider::default(),
            base_url: None,
            api_key_env: None,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: None,
        }
    }
}

impl ProviderSettings {
    /// Settings for a provider with all other values defaulted.
    pub fn new(kind: ModelProvider) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set the endpoint override.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API key environment variable override.
    pub fn with_api_key_env(mut self, env: impl Into<String>) -> Self {
        self.api_key_env = Some(env.into());
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set retry attempts.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Endpoint actually used: override or provider default.
    pub fn endpoint(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.kind.default_endpoint().to_string())
    }

    /// API key variable actually used: override or provider default.
    pub fn key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| self.kind.default_api_key_env().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let settings = ProviderSettings::new(ModelProvider::Google)
            .with_base_url("http://localhost:8080/v1/chat/completions")
            .with_api_key_env("LOCAL_KEY");
        assert_eq!(settings.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(settings.key_env(), "LOCAL_KEY");
    }

    #[test]
    fn test_serde_defaults() {
        let settings: ProviderSettings = serde_json::from_str(r#"{"kind": "google"}"#).unwrap();
        assert_eq!(*settings.kind(), ModelProvider::Google);
        assert_eq!(*settings.timeout_secs(), 300);
        assert_eq!(*settings.max_retries(), 3);
        assert_eq!(settings.key_env(), "GOOGLE_API_KEY");
    }
}
