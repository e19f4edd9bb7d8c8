//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves Azure OpenAI deployments and
//! plain OpenAI-style endpoints; the two differ only in the `async-openai`
//! config type that shapes URLs and auth headers.

pub mod config;

use async_openai::config::{AzureConfig, Config, OpenAIConfig};
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use async_openai::Client;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::Instrument;

use solarcast_core::llm::provider::LlmProvider;
use solarcast_observe::genai_attrs::{
    GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_REQUEST_MAX_TOKENS,
    GEN_AI_REQUEST_MODEL, GEN_AI_REQUEST_TEMPERATURE, GEN_AI_RESPONSE_ID,
    GEN_AI_USAGE_INPUT_TOKENS, GEN_AI_USAGE_OUTPUT_TOKENS, OP_CHAT,
};
use solarcast_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
};

use self::config::OpenAiCompatConfig;

/// Unified provider for Azure OpenAI and OpenAI-compatible APIs.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider<C: Config = OpenAIConfig> {
    client: Client<C>,
    provider_name: String,
    model: String,
}

impl OpenAiCompatibleProvider<OpenAIConfig> {
    /// Create a provider for an OpenAI-style endpoint.
    pub fn openai(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        let oai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);
        Self::with_client_config(oai_config, config)
    }
}

impl OpenAiCompatibleProvider<AzureConfig> {
    /// Create a provider for an Azure OpenAI deployment.
    pub fn azure(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        let api_version = config
            .api_version
            .clone()
            .ok_or_else(|| LlmError::InvalidRequest("Azure requires an api-version".into()))?;
        let azure_config = AzureConfig::new()
            .with_api_base(&config.base_url)
            .with_api_key(config.api_key.expose_secret())
            .with_deployment_id(&config.model)
            .with_api_version(api_version);
        Self::with_client_config(azure_config, config)
    }
}

impl<C: Config> OpenAiCompatibleProvider<C> {
    fn with_client_config(client_config: C, config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        // One attempt per call; async-openai retries 5xx and 429 by default.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Ok(Self {
            client: Client::with_config(client_config)
                .with_http_client(http_client)
                .with_backoff(no_retry),
            provider_name: config.provider_name,
            model: config.model,
        })
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
            })
            .collect();

        // Use the model from the request if set, otherwise fall back to config default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl<C: Config + 'static> LlmProvider for OpenAiCompatibleProvider<C> {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let span = tracing::info_span!(
            "chat",
            { GEN_AI_OPERATION_NAME } = OP_CHAT,
            { GEN_AI_PROVIDER_NAME } = %self.provider_name,
            { GEN_AI_REQUEST_MODEL } = %oai_request.model,
            { GEN_AI_REQUEST_MAX_TOKENS } = tracing::field::Empty,
            { GEN_AI_REQUEST_TEMPERATURE } = tracing::field::Empty,
            { GEN_AI_RESPONSE_ID } = tracing::field::Empty,
            { GEN_AI_USAGE_INPUT_TOKENS } = tracing::field::Empty,
            { GEN_AI_USAGE_OUTPUT_TOKENS } = tracing::field::Empty,
        );
        if let Some(max_tokens) = request.max_tokens {
            span.record(GEN_AI_REQUEST_MAX_TOKENS, max_tokens);
        }
        if let Some(temperature) = request.temperature {
            span.record(GEN_AI_REQUEST_TEMPERATURE, temperature);
        }

        let response = self
            .client
            .chat()
            .create(oai_request)
            .instrument(span.clone())
            .await
            .map_err(map_openai_error)?;

        // Extract content from the first choice
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone());

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        span.record(GEN_AI_RESPONSE_ID, response.id.as_str());
        span.record(GEN_AI_USAGE_INPUT_TOKENS, usage.input_tokens);
        span.record(GEN_AI_USAGE_OUTPUT_TOKENS, usage.output_tokens);

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            usage,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            // Check for known error types by code or type field
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || code == "401"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
                || api_err.message.contains("Access denied due to invalid subscription key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded"
                || code == "429"
                || error_type == "rate_limit_error"
            {
                LlmError::RateLimited
            } else if code == "server_error" || error_type == "overloaded_error" {
                LlmError::Overloaded(api_err.message.clone())
            } else if code == "DeploymentNotFound" {
                LlmError::InvalidRequest(api_err.message.clone())
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if reqwest_err.is_timeout() {
                return LlmError::Timeout;
            }
            match reqwest_err.status().map(|s| s.as_u16()) {
                Some(401) | Some(403) => LlmError::AuthenticationFailed,
                Some(429) => LlmError::RateLimited,
                Some(503) | Some(529) => LlmError::Overloaded(err.to_string()),
                _ => LlmError::Provider {
                    message: err.to_string(),
                },
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}
