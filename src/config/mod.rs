use std::path::Path;

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Connection string for the project store (`DEFAULT_CONNECTION`)
    pub default_connection: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails when `DEFAULT_CONNECTION` is missing or blank.
    pub fn load() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Build the configuration from `(KEY, value)` pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .context("Connection string 'DEFAULT_CONNECTION' is not found in the configuration")?;

        if config.default_connection.trim().is_empty() {
            bail!("Connection string 'DEFAULT_CONNECTION' is empty");
        }

        Ok(config)
    }

    /// Get a direct reference to the connection string
    pub fn connection_string(&self) -> &str {
        self.default_connection.trim()
    }
}

/// Load the settings file and build the configuration
///
/// An explicit settings file must exist; the default `.env` is optional.
pub fn init(env_file: Option<&Path>) -> Result<Config> {
    match env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        }
        None => {
            dotenv().ok();
        }
    }

    Config::load()
}
