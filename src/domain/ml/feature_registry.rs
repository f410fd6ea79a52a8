use chrono::{Datelike, NaiveDate};

/// Ordered list of feature names.
/// This order MUST match the column order used by the trainer.
/// Any change here is a breaking change for persisted models.
pub const FEATURE_NAMES: &[&str] = &["year", "month"];

/// Calendar decomposition of a date, as consumed by the price model.
///
/// The day of month is deliberately dropped: two dates in the same month
/// always produce the same vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector {
    pub year: i32,
    pub month: u32,
}

impl FeatureVector {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Single model row, in `FEATURE_NAMES` order.
    pub fn to_row(&self) -> Vec<f64> {
        vec![f64::from(self.year), f64::from(self.month)]
    }
}

impl From<NaiveDate> for FeatureVector {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}
