//! HTTP surface of the prediction service.
//!
//! One route, `POST /api/silver`. The body is taken as raw bytes so that
//! malformed JSON is answered with the service's own envelope instead of
//! the framework's rejection. A panic inside the pipeline is turned into the
//! same 500 envelope as any other inference failure.

use crate::application::prediction_service::{PredictionOutcome, PredictionService};
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use std::any::Any as PanicPayload;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

pub const PREDICT_ROUTE: &str = "/api/silver";

/// Builds the router with an open CORS policy and request tracing.
pub fn router(service: Arc<PredictionService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(PREDICT_ROUTE, post(predict_silver_price))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

async fn predict_silver_price(
    State(service): State<Arc<PredictionService>>,
    body: Bytes,
) -> PredictionOutcome {
    service.handle(&body)
}

fn panic_response(panic: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    error!("Request handler panicked: {}", detail);
    PredictionOutcome::InternalError(format!("Prediction panicked: {}", detail)).into_response()
}

impl IntoResponse for PredictionOutcome {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.envelope())).into_response()
    }
}
