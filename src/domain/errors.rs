use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a persisted model artifact.
///
/// All of these are startup-only: a service that cannot load its model must not start.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Model artifact not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("Failed to read model artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model artifact {path:?} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Model artifact expects {actual} features, service provides {expected}")]
    IncompatibleShape { expected: usize, actual: usize },
}

/// Errors raised by a loaded model at inference time.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Matrix creation failed: {reason}")]
    InvalidInput { reason: String },

    #[error("Prediction failed: {reason}")]
    Inference { reason: String },

    #[error("No prediction returned")]
    EmptyOutput,

    #[error("Model produced a non-finite prediction: {value}")]
    NonFinite { value: f64 },
}

/// Errors raised by the offline training pipeline.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Training data not found at {path:?}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to read training data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date {value:?} on row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("Not enough labeled rows to fit: have {available}, need at least {required}")]
    InsufficientData { available: usize, required: usize },

    #[error("Invalid test size {0}: must be in [0, 1)")]
    InvalidTestSize(f64),

    #[error("Training failed: {reason}")]
    Fit { reason: String },

    #[error("Failed to persist model to {path:?}: {reason}")]
    Persist { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_shape_formatting() {
        let err = ModelLoadError::IncompatibleShape {
            expected: 2,
            actual: 15,
        };

        let msg = err.to_string();
        assert!(msg.contains("15"));
        assert!(msg.contains("2"));
    }

    #[test]
    fn test_invalid_date_formatting() {
        let err = TrainingError::InvalidDate {
            row: 42,
            value: "13/45/2020".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("row 42"));
        assert!(msg.contains("13/45/2020"));
    }
}
