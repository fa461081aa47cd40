//! Raw caller payloads and the parsing that turns them into a [`FeatureVector`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::vector::ensure_finite;
use crate::{FeatureError, FeatureField, FeatureVector, FEATURE_COUNT};

/// A feature payload as it arrives over the wire.
///
/// Either a positional array in fitted order, or an object keyed by
/// [`FeatureField::key`]. Values may be JSON numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureInput {
    Values(Vec<Value>),
    Named(Map<String, Value>),
}

impl FeatureInput {
    /// Validates the payload and builds the vector.
    pub fn to_vector(&self) -> Result<FeatureVector, FeatureError> {
        let result = match self {
            FeatureInput::Values(values) => vector_from_values(values),
            FeatureInput::Named(map) => vector_from_map(map),
        };
        if let Err(err) = &result {
            debug!(error = %err, "feature_input_rejected");
        }
        result
    }
}

impl TryFrom<Value> for FeatureInput {
    type Error = FeatureError;

    /// Accepts any JSON value, so one malformed row can be reported on its
    /// own instead of failing the whole document it came in.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(values) => Ok(FeatureInput::Values(values)),
            Value::Object(map) => Ok(FeatureInput::Named(map)),
            other => {
                let err = FeatureError::NotARow(json_type(&other));
                debug!(error = %err, "feature_input_rejected");
                Err(err)
            }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<FeatureVector> for FeatureInput {
    fn from(vector: FeatureVector) -> Self {
        FeatureInput::Values(vector.as_slice().iter().map(|v| Value::from(*v)).collect())
    }
}

impl From<Vec<f64>> for FeatureInput {
    fn from(values: Vec<f64>) -> Self {
        FeatureInput::Values(values.into_iter().map(Value::from).collect())
    }
}

fn vector_from_values(values: &[Value]) -> Result<FeatureVector, FeatureError> {
    if values.len() != FEATURE_COUNT {
        return Err(FeatureError::WrongLength {
            expected: FEATURE_COUNT,
            got: values.len(),
        });
    }
    let mut row = [0.0; FEATURE_COUNT];
    for (field, value) in FeatureField::ALL.into_iter().zip(values) {
        row[field.index()] = parse_value(field, value)?;
    }
    FeatureVector::new(row)
}

fn vector_from_map(map: &Map<String, Value>) -> Result<FeatureVector, FeatureError> {
    let mut row: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];
    for (key, value) in map {
        let field: FeatureField = key.parse()?;
        row[field.index()] = Some(parse_value(field, value)?);
    }
    collect_row(row)
}

/// Builds a vector from `(key, text)` pairs, the shape an HTML form posts.
///
/// Every field must appear; unknown keys are rejected. A key that appears
/// twice keeps its last value.
pub fn vector_from_pairs<I, K, V>(pairs: I) -> Result<FeatureVector, FeatureError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut row: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];
    for (key, raw) in pairs {
        let field: FeatureField = key.as_ref().parse()?;
        row[field.index()] = Some(parse_text(field, raw.as_ref())?);
    }
    collect_row(row)
}

fn collect_row(row: [Option<f64>; FEATURE_COUNT]) -> Result<FeatureVector, FeatureError> {
    let mut values = [0.0; FEATURE_COUNT];
    for (field, slot) in FeatureField::ALL.into_iter().zip(row) {
        values[field.index()] =
            slot.ok_or_else(|| FeatureError::MissingField(field.key().to_string()))?;
    }
    FeatureVector::new(values)
}

/// Reads one JSON value as a finite number.
pub fn parse_value(field: FeatureField, value: &Value) -> Result<f64, FeatureError> {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(v) => ensure_finite(field, v),
            None => Err(not_numeric(field, value.to_string())),
        },
        Value::String(text) => parse_text(field, text),
        other => Err(not_numeric(field, other.to_string())),
    }
}

/// Reads one text value as a finite number. Surrounding whitespace is ignored.
pub fn parse_text(field: FeatureField, raw: &str) -> Result<f64, FeatureError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| not_numeric(field, format!("{raw:?}")))
}

fn not_numeric(field: FeatureField, value: String) -> FeatureError {
    FeatureError::NotNumeric {
        field: field.key().to_string(),
        value,
    }
}
