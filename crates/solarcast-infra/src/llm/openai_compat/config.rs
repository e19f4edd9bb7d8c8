//! Connection settings for OpenAI-compatible chat providers.
//!
//! Each supported flavour gets a factory returning an [`OpenAiCompatConfig`]
//! with the right provider name and defaults.

use std::time::Duration;

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name ("azure", "openai").
    pub provider_name: String,
    /// Endpoint: Azure resource URL or OpenAI-style base URL.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier; the deployment name on Azure.
    pub model: String,
    /// Azure `api-version` query parameter.
    pub api_version: Option<String>,
    /// Whole-request timeout for the HTTP client.
    pub timeout: Duration,
}

/// Azure OpenAI configuration.
///
/// Requests go to `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`.
pub fn azure_defaults(
    endpoint: &str,
    api_key: SecretString,
    deployment: &str,
    api_version: &str,
) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "azure".into(),
        base_url: endpoint.trim_end_matches('/').into(),
        api_key,
        model: deployment.into(),
        api_version: Some(api_version.into()),
        timeout: Duration::from_secs(60),
    }
}

/// Plain OpenAI-compatible configuration.
///
/// Base URL defaults to `https://api.openai.com/v1` when none is given.
pub fn openai_defaults(base_url: Option<&str>, api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: base_url
            .unwrap_or("https://api.openai.com/v1")
            .trim_end_matches('/')
            .into(),
        api_key,
        model: model.into(),
        api_version: None,
        timeout: Duration::from_secs(60),
    }
}

impl OpenAiCompatConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
