// Price quotes returned to clients
pub mod quote;

pub use quote::{CURRENCY, PriceQuote, round_price};
