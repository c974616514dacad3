mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration from `.env`, the YAML file and the process environment.
///
/// A missing API key is a configuration error; the server refuses to start.
pub async fn load() -> Result<Config> {
    // A missing .env file is fine, the variables may already be exported.
    let _ = dotenv::dotenv();

    let explicit_path = env::var("CONFIG_PATH").ok();
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if explicit_path.is_some() || Path::new(&config_path).exists() {
        from_file(&config_path).await?
    } else {
        debug!("No configuration file found, using defaults");
        Config::default()
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    validate(&config)?;

    Ok(config)
}

pub async fn from_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    from_yaml(&config_str)
}

pub fn from_yaml(config_str: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to an empty mapping.
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(api_key) = lookup("GEMINI_API_KEY").or_else(|| lookup("LLM_API_KEY")) {
        config.llm.api_key = api_key;
    }

    if let Some(provider) = lookup("LLM_PROVIDER") {
        config.llm.provider = serde_yaml::from_str(&provider)
            .map_err(|_| Error::config(format!("Unknown LLM provider: '{}'", provider)))?;
    }

    if let Some(model) = lookup("LLM_MODEL") {
        config.llm.model = model;
    }

    if let Some(base_url) = lookup("LLM_BASE_URL") {
        config.llm.base_url = base_url;
    }

    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    Ok(())
}

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        return Err(Error::config(
            "No API key configured. Set GEMINI_API_KEY in the environment or .env file",
        ));
    }

    if config.llm.model.trim().is_empty() {
        return Err(Error::config("llm.model must not be empty"));
    }

    if config.llm.timeout_secs == 0 {
        return Err(Error::config("llm.timeout_secs must be greater than zero"));
    }

    Ok(())
}
