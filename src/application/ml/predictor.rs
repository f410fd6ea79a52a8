use crate::domain::errors::PredictionError;
use crate::domain::ml::FeatureVector;

/// Interface for price models.
///
/// Implementations are loaded once and then shared read-only between
/// concurrent requests, so `predict` must not need `&mut self`.
pub trait PricePredictor: Send + Sync {
    /// Predict the raw (unrounded) price for a feature vector.
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
