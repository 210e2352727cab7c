mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

/// Environment variable holding the generation service credential.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_from_path(&config_path).await?;

    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            debug!("Using API key from {}", API_KEY_ENV);
            config.llm.api_key = Some(key);
        }
    }

    Ok(config)
}

/// Loads configuration from `path`, falling back to defaults when the file does not exist.
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = match tokio::fs::read_to_string(path).await {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config: Config = serde_yaml::from_str(&config_str)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.image.max_dimension == 0 {
        return Err(Error::config("image.max_dimension must be positive"));
    }
    if !(1..=100).contains(&config.image.jpeg_quality) {
        return Err(Error::config(format!(
            "image.jpeg_quality must be within 1..=100, got {}",
            config.image.jpeg_quality
        )));
    }
    Ok(())
}
