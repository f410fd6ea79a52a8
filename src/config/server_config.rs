//! HTTP server configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::net::IpAddr;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Server environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEnvConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        host.parse::<IpAddr>()
            .with_context(|| format!("Invalid SERVER_HOST: {}", host))?;

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid SERVER_PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self { host, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerEnvConfig::from_lookup(&|_: &str| None).unwrap();
        assert_eq!(config, ServerEnvConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
    }
}
