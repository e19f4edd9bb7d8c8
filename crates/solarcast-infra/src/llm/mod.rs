//! LLM provider construction.
//!
//! [`create_provider`] turns an [`LlmConfig`] into a [`BoxLlmProvider`];
//! [`build_gateway`] wraps that into a [`ChatGateway`], degrading to an
//! unconfigured gateway when credentials are missing so the service can
//! still start and answer `/chat` with the fallback text.

pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;
use tracing::{info, warn};

use solarcast_core::chat::gateway::ChatGateway;
use solarcast_core::llm::box_provider::BoxLlmProvider;
use solarcast_types::config::LlmConfig;
use solarcast_types::llm::{LlmError, ProviderKind};

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{azure_defaults, openai_defaults};

/// Create a [`BoxLlmProvider`] from an [`LlmConfig`].
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key is set and
/// [`LlmError::InvalidRequest`] when a required setting is missing.
pub fn create_provider(config: &LlmConfig) -> Result<BoxLlmProvider, LlmError> {
    let key = config
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(LlmError::AuthenticationFailed)?;
    let secret = SecretString::from(key.to_string());
    let deployment = required(config.deployment.as_deref(), "deployment")?;
    let timeout = Duration::from_secs(config.request_timeout_secs);

    match config.provider {
        ProviderKind::Azure => {
            let endpoint = required(config.endpoint.as_deref(), "endpoint")?;
            let provider = OpenAiCompatibleProvider::azure(
                azure_defaults(endpoint, secret, deployment, &config.api_version)
                    .with_timeout(timeout),
            )?;
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderKind::OpenAi => {
            let provider = OpenAiCompatibleProvider::openai(
                openai_defaults(config.endpoint.as_deref(), secret, deployment)
                    .with_timeout(timeout),
            )?;
            Ok(BoxLlmProvider::new(provider))
        }
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, LlmError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| LlmError::InvalidRequest(format!("llm.{key} is not set")))
}

/// Build the chat gateway for the service.
///
/// Never fails: a provider that cannot be constructed yields a gateway
/// whose every call reports `NotConfigured`.
pub fn build_gateway(config: &LlmConfig) -> ChatGateway {
    match create_provider(config) {
        Ok(provider) => {
            info!(
                provider = provider.name(),
                deployment = config.deployment.as_deref().unwrap_or_default(),
                "chat provider configured"
            );
            ChatGateway::new(provider, config.deployment.clone().unwrap_or_default())
                .with_max_tokens(config.max_tokens)
                .with_temperature(config.temperature)
        }
        Err(e) => {
            warn!(error = %e, "chat provider unavailable; /chat will serve fallback answers");
            ChatGateway::unconfigured(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn azure_config() -> LlmConfig {
        LlmConfig {
            provider: ProviderKind::Azure,
            endpoint: Some("https://solar.openai.azure.com".into()),
            deployment: Some("gpt-4o-solar".into()),
            api_key: Some("az-key".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_provider_azure() {
        let provider = create_provider(&azure_config()).unwrap();
        assert_eq!(provider.name(), "azure");
    }

    #[test]
    fn test_create_provider_openai_without_endpoint() {
        let config = LlmConfig {
            provider: ProviderKind::OpenAi,
            endpoint: None,
            ..azure_config()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_missing_key() {
        let config = LlmConfig {
            api_key: None,
            ..azure_config()
        };
        match create_provider(&config) {
            Err(LlmError::AuthenticationFailed) => {}
            Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }

    #[test]
    fn test_create_provider_azure_missing_endpoint() {
        let config = LlmConfig {
            endpoint: None,
            ..azure_config()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(matches!(err, LlmError::InvalidRequest(msg) if msg.contains("endpoint")));
    }

    #[test]
    fn test_create_provider_blank_deployment() {
        let config = LlmConfig {
            deployment: Some("  ".into()),
            ..azure_config()
        };
        let err = create_provider(&config).err().unwrap();
        assert!(matches!(err, LlmError::InvalidRequest(msg) if msg.contains("deployment")));
    }

    #[test]
    fn test_build_gateway_configured() {
        let gateway = build_gateway(&azure_config());
        assert!(gateway.is_configured());
        assert_eq!(gateway.provider_name(), "azure");
    }

    #[tokio::test]
    async fn test_build_gateway_unconfigured_fails_calls() {
        let gateway = build_gateway(&LlmConfig::default());
        assert!(!gateway.is_configured());
        assert_eq!(gateway.provider_name(), "unconfigured");

        let err = gateway.ask("anything").await.unwrap_err();
        assert!(matches!(
            err,
            solarcast_types::llm::GatewayError::NotConfigured(_)
        ));
    }
}
