// Model loading, inference and offline training
pub mod ml;

// Request pipeline
pub mod prediction_service;

// System orchestrator
pub mod system;
