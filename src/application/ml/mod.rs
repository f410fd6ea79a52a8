pub mod linear_predictor;
pub mod predictor;
pub mod trainer;

pub use linear_predictor::{LinearModel, LinearPricePredictor};
pub use predictor::PricePredictor;
