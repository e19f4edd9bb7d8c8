//! Configuration types for Solarcast.
//!
//! `AppConfig` mirrors the optional `solarcast.toml` file. Every field has a
//! default so an empty (or missing) file yields a runnable configuration;
//! environment variables are layered on top by the infra loader.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::llm::ProviderKind;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Forecasting model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the pre-fitted model artifact (JSON).
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// Horizon used when `/forecast` is called without `days`.
    #[serde(default = "default_horizon_days")]
    pub default_horizon_days: u32,

    /// Largest accepted horizon.
    #[serde(default = "default_max_horizon_days")]
    pub max_horizon_days: u32,

    /// Values used for regressor columns the caller does not supply.
    #[serde(default = "default_regressor_values")]
    pub regressor_defaults: BTreeMap<String, f64>,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

fn default_horizon_days() -> u32 {
    7
}

fn default_max_horizon_days() -> u32 {
    90
}

/// Typical off-peak conditions at the training site.
pub fn default_regressor_values() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("temperature".to_string(), -15.0),
        ("humidity".to_string(), 0.001),
        ("irradiance_ground".to_string(), 50.0),
        ("irradiance_atmos".to_string(), 150.0),
    ])
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            default_horizon_days: default_horizon_days(),
            max_horizon_days: default_max_horizon_days(),
            regressor_defaults: default_regressor_values(),
        }
    }
}

/// External language-model service settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Service endpoint, e.g. `https://my-resource.openai.azure.com`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Azure deployment name (also sent as the model name).
    #[serde(default)]
    pub deployment: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Never written back out; usually supplied through the environment.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub temperature: Option<f64>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_version() -> String {
    "2024-12-01-preview".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            endpoint: None,
            deployment: None,
            api_version: default_api_version(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// Hand-written so the API key never ends up in logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
