use config as config_rs;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// Which artifact sink the orchestrator is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkMode {
    Local,
    Remote,
}

impl FromStr for SinkMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(SinkMode::Local),
            "remote" => Ok(SinkMode::Remote),
            other => Err(ConfigError::UnknownSinkMode(other.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub engine_endpoint: String,
    pub engine_api_key: String,
    pub output_dir: String,
    pub bucket_endpoint: String,
    pub bucket_name: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
    #[error("unknown sink mode: {0}")]
    UnknownSinkMode(String),
}

pub fn load_config(
    engine_endpoint: &str,
    api_key: &Option<String>,
    output_dir: &str,
    bucket_endpoint: &str,
    bucket_name: &str,
) -> Result<AppConfig, ConfigError> {
    // Layered: env overrides first, then CLI flags take precedence
    let mut builder = config_rs::Config::builder();

    if let Ok(endpoint) = std::env::var("JSCLOAK_ENGINE_ENDPOINT") {
        builder = builder.set_override("engine_endpoint", endpoint)?;
    }
    if let Ok(key) = std::env::var("JSCLOAK_API_KEY") {
        builder = builder.set_override("engine_api_key", key)?;
    }

    builder = builder
        .set_override("engine_endpoint", engine_endpoint.to_string())?
        .set_override(
            "engine_api_key",
            api_key
                .clone()
                .unwrap_or_else(|| std::env::var("JSCLOAK_API_KEY").unwrap_or_default()),
        )?
        .set_override("output_dir", output_dir.to_string())?
        .set_override("bucket_endpoint", bucket_endpoint.to_string())?
        .set_override("bucket_name", bucket_name.to_string())?;

    let cfg = builder.build()?;

    Ok(AppConfig {
        engine_endpoint: cfg.get::<String>("engine_endpoint")?,
        engine_api_key: cfg.get::<String>("engine_api_key")?,
        output_dir: cfg.get::<String>("output_dir")?,
        bucket_endpoint: cfg.get::<String>("bucket_endpoint")?,
        bucket_name: cfg.get::<String>("bucket_name")?,
    })
}
