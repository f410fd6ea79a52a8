// Request schema validation
pub mod request_schema;

pub use request_schema::{DATE_FIELD, SilverPriceRequest, ValidationErrors};
