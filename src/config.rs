use crate::error::ExporterError;
use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub switch: SwitchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Target switch and the credentials for its web interface
#[derive(Debug, Deserialize, Clone)]
pub struct SwitchConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub password: Option<SecretString>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9717
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: default_username(),
            password: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("TPLINK_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Check the values that have no usable default
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.switch.host.trim().is_empty() {
            return Err(ExporterError::Config(
                "switch host is required (--host or TPLINK_HOST)".to_string(),
            ));
        }
        if self.switch.password.is_none() {
            return Err(ExporterError::Config(
                "switch password is required (--password or TPLINK_PASSWORD)".to_string(),
            ));
        }
        if self.switch.request_timeout_seconds == 0 {
            return Err(ExporterError::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
