//! Configuration loader for Solarcast.
//!
//! Reads `solarcast.toml` (or an explicit `--config` path) into
//! [`AppConfig`], then layers environment variables on top. A missing default
//! file yields defaults; an explicit path that is missing, or any file that
//! fails to parse, is an error.

use std::path::{Path, PathBuf};

use solarcast_types::config::AppConfig;
use solarcast_types::error::ConfigError;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "solarcast.toml";

pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_MODEL_PATH: &str = "SOLARCAST_MODEL_PATH";
pub const ENV_HOST: &str = "SOLARCAST_HOST";
pub const ENV_PORT: &str = "SOLARCAST_PORT";

/// Load configuration from file and process environment.
pub async fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = load_config_file(explicit).await?;
    apply_env(config, |key| std::env::var(key).ok())
}

/// Load only the TOML file.
///
/// - `explicit = None` and no `solarcast.toml`: returns [`AppConfig::default()`].
/// - `explicit = Some(path)` and the file is missing: [`ConfigError::Read`].
/// - The file exists but does not parse: [`ConfigError::Parse`].
pub async fn load_config_file(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    let config = toml::from_str::<AppConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Override file values with environment variables.
///
/// `lookup` is the variable source; empty values are ignored.
pub fn apply_env<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(ENV_API_KEY) {
        config.llm.api_key = Some(key);
    }
    if let Some(endpoint) = get(ENV_ENDPOINT) {
        config.llm.endpoint = Some(endpoint);
    }
    if let Some(deployment) = get(ENV_DEPLOYMENT) {
        config.llm.deployment = Some(deployment);
    }
    if let Some(version) = get(ENV_API_VERSION) {
        config.llm.api_version = version;
    }
    if let Some(path) = get(ENV_MODEL_PATH) {
        config.model.path = PathBuf::from(path);
    }
    if let Some(host) = get(ENV_HOST) {
        config.server.host = host;
    }
    if let Some(port) = get(ENV_PORT) {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: ENV_PORT.to_string(),
            message: format!("'{port}' is not a valid port"),
        })?;
    }

    Ok(config)
}
