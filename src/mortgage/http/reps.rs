use serde::{ser::Error as _, Deserialize, Serialize, Serializer};

use crate::mortgage::domain::CalculationError;

/// Body returned from a calculation.
///
/// Exactly one of the fields is populated, and only that field is serialized.
#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CalculateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_finite"
    )]
    pub result: Option<f64>,
}

/// Fails for NaN and infinite values, which have no JSON representation.
fn serialize_finite<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(number) if !number.is_finite() => {
            Err(S::Error::custom(format!("unsupported value: {}", number)))
        }
        _ => value.serialize(serializer),
    }
}

impl CalculateResponse {
    pub fn from_payment(payment: f64) -> Self {
        Self {
            error: None,
            result: Some(payment),
        }
    }
}

impl From<&CalculationError> for CalculateResponse {
    fn from(error: &CalculationError) -> Self {
        Self {
            error: Some(format!("Invalid Calculation: \"{}\"", error)),
            result: None,
        }
    }
}
