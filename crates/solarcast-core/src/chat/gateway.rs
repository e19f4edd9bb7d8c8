//! Chat gateway to the external language model.
//!
//! `ChatGateway::ask` sends one prompt as a single-message conversation and
//! returns a typed result. It never retries and never builds a fallback
//! itself; callers decide what to answer when it fails.

use tracing::{debug, warn};

use solarcast_types::llm::{CompletionRequest, GatewayError, Message};

use crate::llm::box_provider::BoxLlmProvider;

enum Backend {
    Provider(BoxLlmProvider),
    /// No usable provider; every call fails with the stored reason.
    Unconfigured(String),
}

/// Sends prompts to the configured provider.
pub struct ChatGateway {
    backend: Backend,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
}

impl ChatGateway {
    /// Create a gateway over `provider`, requesting `model` (Azure deployment name).
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>) -> Self {
        Self {
            backend: Backend::Provider(provider),
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// A gateway that fails every call, e.g. when credentials are missing.
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unconfigured(reason.into()),
            model: String::new(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.backend, Backend::Provider(_))
    }

    /// Name of the backing provider, or `"unconfigured"`.
    pub fn provider_name(&self) -> &str {
        match &self.backend {
            Backend::Provider(provider) => provider.name(),
            Backend::Unconfigured(_) => "unconfigured",
        }
    }

    /// Send `prompt` and return the generated answer.
    pub async fn ask(&self, prompt: &str) -> Result<String, GatewayError> {
        let provider = match &self.backend {
            Backend::Provider(provider) => provider,
            Backend::Unconfigured(reason) => {
                return Err(GatewayError::NotConfigured(reason.clone()));
            }
        };

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = provider.complete(&request).await.map_err(|e| {
            warn!(provider = provider.name(), error = %e, "chat completion failed");
            GatewayError::from(e)
        })?;

        debug!(
            provider = provider.name(),
            response_id = %response.id,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "chat completion received"
        );

        match response.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GatewayError::EmptyAnswer),
        }
    }
}

impl std::fmt::Debug for ChatGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatGateway")
            .field("provider", &self.provider_name())
            .field("model", &self.model)
            .finish()
    }
}
