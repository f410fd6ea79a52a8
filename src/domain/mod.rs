// Domain-specific error types
pub mod errors;

// Feature engineering shared by training and serving
pub mod ml;

// Price quotes
pub mod pricing;

// Request validation
pub mod validation;
