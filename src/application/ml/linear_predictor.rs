use super::predictor::PricePredictor;
use crate::domain::errors::{ModelLoadError, PredictionError};
use crate::domain::ml::{FEATURE_NAMES, FeatureVector};
use crate::infrastructure::persistence::ModelStore;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::LinearRegression;
use std::path::Path;
use tracing::info;

/// Ordinary least squares model over `FEATURE_NAMES`.
pub type LinearModel = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;

pub struct LinearPricePredictor {
    model: LinearModel,
}

impl LinearPricePredictor {
    /// Loads a persisted model. Any failure here is fatal for the caller.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let model: LinearModel = ModelStore::new(model_path.as_ref()).load()?;
        let predictor = Self::from_model(model)?;
        info!(
            "Linear price model ready ({} features: {:?})",
            FEATURE_NAMES.len(),
            FEATURE_NAMES
        );
        Ok(predictor)
    }

    /// Wraps an in-memory model, rejecting one fitted on a different feature layout.
    pub fn from_model(model: LinearModel) -> Result<Self, ModelLoadError> {
        let (n_coefficients, _) = model.coefficients().shape();
        if n_coefficients != FEATURE_NAMES.len() {
            return Err(ModelLoadError::IncompatibleShape {
                expected: FEATURE_NAMES.len(),
                actual: n_coefficients,
            });
        }
        Ok(Self { model })
    }
}

impl PricePredictor for LinearPricePredictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![features.to_row()]).map_err(|e| {
            PredictionError::InvalidInput {
                reason: e.to_string(),
            }
        })?;

        let predictions = self
            .model
            .predict(&input_matrix)
            .map_err(|e| PredictionError::Inference {
                reason: e.to_string(),
            })?;

        predictions
            .first()
            .copied()
            .ok_or(PredictionError::EmptyOutput)
    }

    fn name(&self) -> &str {
        "SmartCore Linear Regression"
    }
}
