use crate::application::ml::{LinearPricePredictor, PricePredictor};
use crate::application::prediction_service::PredictionService;
use crate::config::Config;
use crate::interfaces::api;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// The assembled service: configuration plus the request pipeline bound to a loaded model.
///
/// A model that cannot be loaded makes [`Application::build`] fail, so there is
/// no degraded mode in which the listener runs without a model.
pub struct Application {
    pub config: Config,
    pub service: Arc<PredictionService>,
}

impl Application {
    pub fn build(config: Config) -> Result<Self> {
        info!("Building silver price service (model: {:?})...", config.model_path);

        let predictor = LinearPricePredictor::load(&config.model_path)
            .with_context(|| format!("Failed to load model from {:?}", config.model_path))?;

        Ok(Self::with_predictor(config, Arc::new(predictor)))
    }

    /// Assembles the service around an already loaded model.
    pub fn with_predictor(config: Config, predictor: Arc<dyn PricePredictor>) -> Self {
        info!("Using model: {}", predictor.name());
        Self {
            config,
            service: Arc::new(PredictionService::new(predictor)),
        }
    }

    pub fn router(&self) -> Router {
        api::router(self.service.clone())
    }

    /// Binds the configured address and serves until Ctrl+C.
    pub async fn run(self) -> Result<()> {
        let address = self.config.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {}", address))?;

        self.serve(listener, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received. Exiting...");
        })
        .await
    }

    /// Serves on an existing listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr().context("Listener has no local address")?;
        info!("Listening on http://{}{}", local, api::PREDICT_ROUTE);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("Server error")?;

        Ok(())
    }
}
