//! Configuration module for the silver price service.
//!
//! Configuration is loaded from environment variables (optionally seeded from
//! a `.env` file by the binaries), organized by concern: Server and Model.

mod model_config;
mod server_config;

pub use model_config::{DEFAULT_MODEL_PATH, ModelEnvConfig};
pub use server_config::{DEFAULT_HOST, DEFAULT_PORT, ServerEnvConfig};

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Model
    pub model_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this with the process environment as the source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerEnvConfig::from_lookup(&lookup).context("Failed to load server config")?;
        let model = ModelEnvConfig::from_lookup(&lookup).context("Failed to load model config")?;

        Ok(Self {
            host: server.host,
            port: server.port,
            model_path: model.model_path,
        })
    }

    /// `host:port` string to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
