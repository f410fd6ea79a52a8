//! Model artifact configuration parsing from environment variables.

use anyhow::{Result, bail};
use std::path::PathBuf;

pub const DEFAULT_MODEL_PATH: &str = "LBMA-SILVER-model.json";

/// Model environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEnvConfig {
    pub model_path: PathBuf,
}

impl ModelEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
        if raw.trim().is_empty() {
            bail!("MODEL_PATH must not be empty");
        }
        Ok(Self {
            model_path: PathBuf::from(raw),
        })
    }
}
