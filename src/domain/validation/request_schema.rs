//! Schema check for prediction requests.
//!
//! Turns an untyped JSON object into a [`SilverPriceRequest`], or into a
//! field-keyed list of every violation found.

use chrono::NaiveDate;
use chrono::format::ParseErrorKind;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Name of the only field a prediction request carries.
pub const DATE_FIELD: &str = "silver_date";

const MSG_MISSING: &str = "Field required";
const MSG_NOT_STRING: &str = "Input should be a valid string";
const MSG_BAD_FORMAT: &str = "Input should be a valid date in YYYY-MM-DD format";

/// Field-level violations, keyed by field name.
///
/// Serializes as a plain `{"field": ["message", ...]}` object with keys in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// A request that passed schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilverPriceRequest {
    pub silver_date: NaiveDate,
}

impl SilverPriceRequest {
    /// Validates every field of `payload`. Unknown keys are ignored.
    pub fn validate(payload: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let silver_date = match payload.get(DATE_FIELD) {
            None => {
                errors.add(DATE_FIELD, MSG_MISSING);
                None
            }
            Some(Value::String(raw)) => match parse_iso_date(raw) {
                Ok(date) => Some(date),
                Err(msg) => {
                    errors.add(DATE_FIELD, msg);
                    None
                }
            },
            Some(_) => {
                errors.add(DATE_FIELD, MSG_NOT_STRING);
                None
            }
        };

        match silver_date {
            Some(silver_date) if errors.is_empty() => Ok(Self { silver_date }),
            _ => Err(errors),
        }
    }
}

/// Parses a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts unpadded fields and signed years, so the shape is
/// checked before the calendar.
fn parse_iso_date(raw: &str) -> Result<NaiveDate, String> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(MSG_BAD_FORMAT.to_string());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| match e.kind() {
        ParseErrorKind::OutOfRange | ParseErrorKind::Impossible => {
            format!("Input should be a valid calendar date, {}", e)
        }
        _ => MSG_BAD_FORMAT.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("test payload must be an object, got {}", other),
        }
    }

    #[test]
    fn test_valid_date() {
        let req = SilverPriceRequest::validate(&payload(json!({"silver_date": "2020-06-15"})))
            .unwrap();
        assert_eq!(req.silver_date, NaiveDate::from_ymd_opt(2020, 6, 15).unwrap());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let req = SilverPriceRequest::validate(&payload(
            json!({"silver_date": "2021-01-31", "currency": "EUR"}),
        ));
        assert!(req.is_ok());
    }

    #[test]
    fn test_missing_field() {
        let errors = SilverPriceRequest::validate(&Map::new()).unwrap_err();
        assert_eq!(errors.field(DATE_FIELD), Some(&["Field required".to_string()][..]));
    }

    #[test]
    fn test_wrong_type() {
        for value in [json!(20200615), json!(null), json!(true), json!(["2020-06-15"])] {
            let errors =
                SilverPriceRequest::validate(&payload(json!({ "silver_date": value }))).unwrap_err();
            assert_eq!(
                errors.field(DATE_FIELD),
                Some(&["Input should be a valid string".to_string()][..])
            );
        }
    }

    #[test]
    fn test_bad_format() {
        for raw in ["not-a-date", "2020-6-15", "15/06/2020", "", "+2020-06-15", "2020-06-15T00:00"] {
            let errors =
                SilverPriceRequest::validate(&payload(json!({ "silver_date": raw }))).unwrap_err();
            let messages = errors.field(DATE_FIELD).unwrap();
            assert_eq!(messages, &[MSG_BAD_FORMAT.to_string()][..], "input {:?}", raw);
        }
    }

    #[test]
    fn test_impossible_dates() {
        for raw in ["2023-13-01", "2023-02-30", "2023-04-31", "2023-00-10", "2023-02-29"] {
            let errors =
                SilverPriceRequest::validate(&payload(json!({ "silver_date": raw }))).unwrap_err();
            let messages = errors.field(DATE_FIELD).unwrap();
            assert_eq!(messages.len(), 1);
            assert!(
                messages[0].starts_with("Input should be a valid calendar date"),
                "input {:?} gave {:?}",
                raw,
                messages
            );
        }
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let errors = SilverPriceRequest::validate(&Map::new()).unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"silver_date": ["Field required"]})
        );
    }
}
