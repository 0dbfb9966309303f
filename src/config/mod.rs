mod types;

pub use types::*;

use crate::{Error, Result};
use secrecy::Secret;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path, |key| env::var(key).ok()).await
}

/// Reads the YAML file at `path`, then layers `lookup` overrides on top.
pub async fn load_from<F>(path: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    debug!("Loading configuration from: {}", path);

    let config_str = tokio::fs::read_to_string(path).await?;
    let mut config: Config = serde_yaml::from_str(&config_str)?;

    config.relay.json.apply_env("JSON_RELAY", &lookup);
    config.relay.form.apply_env("FORM_RELAY", &lookup);
    config.validate()?;

    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        for (route, endpoint) in [("json", &self.relay.json), ("form", &self.relay.form)] {
            if endpoint.url.trim().is_empty() {
                return Err(Error::config(format!(
                    "relay.{route}.url is empty; set it in the config file or via the environment"
                )));
            }
            if endpoint.timeout_secs == Some(0) {
                return Err(Error::config(format!(
                    "relay.{route}.timeout_secs must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}

impl EndpointConfig {
    /// Overrides `url` and `api_key` from `<PREFIX>_URL` and `<PREFIX>_API_KEY`.
    pub fn apply_env<F>(&mut self, prefix: &str, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(&format!("{prefix}_URL")) {
            debug!("{}_URL overrides configured endpoint", prefix);
            self.url = url;
        }
        if let Some(api_key) = lookup(&format!("{prefix}_API_KEY")) {
            debug!("{}_API_KEY overrides configured credential", prefix);
            self.api_key = Secret::new(api_key);
        }
    }
}
