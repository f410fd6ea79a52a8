use serde::Serialize;

/// Unit label attached to every quote. Matches the `USD` column the model is trained on.
pub const CURRENCY: &str = "USD/Oz";

/// Rounds a raw model output to cents.
///
/// Ties are broken half-to-even on the value scaled by 100, which is the
/// behavior of numpy's `round` and keeps the served prices consistent with
/// prices computed offline from the same model.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// A successful prediction, ready to be sent to a client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub price: f64,
    pub currency: &'static str,
}

impl PriceQuote {
    pub fn from_prediction(raw: f64) -> Self {
        Self {
            price: round_price(raw),
            currency: CURRENCY,
        }
    }
}
