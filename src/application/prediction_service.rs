//! Request pipeline for price predictions.
//!
//! `receive -> validate -> derive -> infer -> respond`, where every stage
//! returns an explicit result and the first failing stage decides the
//! terminal [`PredictionOutcome`].

use crate::application::ml::PricePredictor;
use crate::domain::errors::PredictionError;
use crate::domain::ml::FeatureVector;
use crate::domain::pricing::PriceQuote;
use crate::domain::validation::{SilverPriceRequest, ValidationErrors};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// `error` label for bodies that are not a JSON object.
pub const INVALID_JSON: &str = "Invalid JSON format";

/// Terminal state of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Success(PriceQuote),
    /// Body is not a JSON object. Carries the parser message.
    MalformedInput(String),
    /// Body is an object but violates the request schema.
    InvalidSchema(ValidationErrors),
    /// Inference failed. Carries the error message only.
    InternalError(String),
}

impl PredictionOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            PredictionOutcome::Success(_) => 200,
            PredictionOutcome::MalformedInput(_) | PredictionOutcome::InvalidSchema(_) => 400,
            PredictionOutcome::InternalError(_) => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success(_))
    }

    pub fn envelope(&self) -> ResponseEnvelope {
        match self {
            PredictionOutcome::Success(quote) => ResponseEnvelope {
                status: true,
                price: Some(quote.price),
                currency: Some(quote.currency.to_string()),
                ..ResponseEnvelope::failure()
            },
            PredictionOutcome::MalformedInput(message) => ResponseEnvelope {
                error: Some(INVALID_JSON.to_string()),
                detail: Some(Value::String(message.clone())),
                ..ResponseEnvelope::failure()
            },
            PredictionOutcome::InvalidSchema(errors) => ResponseEnvelope {
                detail: serde_json::to_value(errors).ok(),
                ..ResponseEnvelope::failure()
            },
            PredictionOutcome::InternalError(message) => ResponseEnvelope {
                error: Some(message.clone()),
                ..ResponseEnvelope::failure()
            },
        }
    }
}

/// JSON body sent back for every request. Absent fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ResponseEnvelope {
    fn failure() -> Self {
        Self {
            status: false,
            price: None,
            currency: None,
            error: None,
            detail: None,
        }
    }
}

/// Validates requests and runs them through the shared model.
pub struct PredictionService {
    predictor: Arc<dyn PricePredictor>,
}

impl PredictionService {
    pub fn new(predictor: Arc<dyn PricePredictor>) -> Self {
        Self { predictor }
    }

    /// Runs the full pipeline on a raw request body.
    pub fn handle(&self, body: &[u8]) -> PredictionOutcome {
        let payload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(message) => {
                warn!("Rejected malformed request body: {}", message);
                return PredictionOutcome::MalformedInput(message);
            }
        };

        let request = match SilverPriceRequest::validate(&payload) {
            Ok(request) => request,
            Err(errors) => {
                warn!(
                    "Rejected request with invalid fields: {:?}",
                    errors.fields().collect::<Vec<_>>()
                );
                return PredictionOutcome::InvalidSchema(errors);
            }
        };

        self.predict_date(request.silver_date)
    }

    /// Derives features from an already validated date and runs inference.
    pub fn predict_date(&self, date: NaiveDate) -> PredictionOutcome {
        let features = FeatureVector::from_date(date);

        match self.infer(&features) {
            Ok(raw) => {
                let quote = PriceQuote::from_prediction(raw);
                debug!(
                    "Predicted {} {} for {} (features {:?}, raw {})",
                    quote.price, quote.currency, date, features, raw
                );
                PredictionOutcome::Success(quote)
            }
            Err(e) => {
                error!(
                    "Inference failed for {} with {}: {}",
                    date,
                    self.predictor.name(),
                    e
                );
                PredictionOutcome::InternalError(e.to_string())
            }
        }
    }

    fn infer(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let value = self.predictor.predict(features)?;
        if !value.is_finite() {
            return Err(PredictionError::NonFinite { value });
        }
        Ok(value)
    }
}

fn parse_payload(body: &[u8]) -> Result<Map<String, Value>, String> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!(
            "Expected a JSON object, got {}",
            json_type_name(&other)
        )),
        Err(e) => Err(e.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
