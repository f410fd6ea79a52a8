// HTTP API
pub mod api;

pub use api::{PREDICT_ROUTE, router};
