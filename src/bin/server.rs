//! Silverline Server - silver price prediction API
//!
//! Loads the fitted model once, then serves `POST /api/silver`.
//! Refuses to start if the model cannot be loaded.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=LBMA-SILVER-model.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `SERVER_HOST` - Address to bind (default: 0.0.0.0)
//! - `SERVER_PORT` - Port to bind (default: 8000)
//! - `MODEL_PATH` - Model artifact produced by `train_model` (default: LBMA-SILVER-model.json)
//! - `RUST_LOG` - Log filter (default: info)

use anyhow::Result;
use silverline::application::system::Application;
use silverline::config::Config;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Silverline Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Bind={}, Model={:?}",
        config.bind_address(),
        config.model_path
    );

    // Fatal if the model is missing or unusable
    let app = Application::build(config)?;

    app.run().await
}
