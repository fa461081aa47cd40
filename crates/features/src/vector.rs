use serde::{Deserialize, Serialize};

use crate::input::FeatureInput;
use crate::{FeatureError, FeatureField, FEATURE_COUNT};

/// Nine finite values in fitted order. Once built it is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<f64>", try_from = "FeatureInput")]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Builds a vector from a fixed-size array, rejecting NaN and infinities.
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, FeatureError> {
        for (field, value) in FeatureField::ALL.iter().zip(values.iter()) {
            ensure_finite(*field, *value)?;
        }
        Ok(Self(values))
    }

    /// Builds a vector from a slice that must hold exactly [`FEATURE_COUNT`] values.
    pub fn from_slice(values: &[f64]) -> Result<Self, FeatureError> {
        let array: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| FeatureError::WrongLength {
                expected: FEATURE_COUNT,
                got: values.len(),
            })?;
        Self::new(array)
    }

    /// Value of a single field.
    pub fn get(&self, field: FeatureField) -> f64 {
        self.0[field.index()]
    }

    /// Row view handed to the scaler.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        self.0
    }

    /// Pairs each value with its field.
    pub fn iter_named(&self) -> impl Iterator<Item = (FeatureField, f64)> + '_ {
        FeatureField::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Default for FeatureVector {
    /// The form's pre-filled values.
    fn default() -> Self {
        Self(FeatureField::ALL.map(FeatureField::default_value))
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = FeatureError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = FeatureError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl TryFrom<FeatureInput> for FeatureVector {
    type Error = FeatureError;

    fn try_from(input: FeatureInput) -> Result<Self, Self::Error> {
        input.to_vector()
    }
}

impl From<FeatureVector> for Vec<f64> {
    fn from(vector: FeatureVector) -> Self {
        vector.0.to_vec()
    }
}

pub(crate) fn ensure_finite(field: FeatureField, value: f64) -> Result<f64, FeatureError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FeatureError::NotNumeric {
            field: field.key().to_string(),
            value: value.to_string(),
        })
    }
}
