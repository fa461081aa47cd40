//! GHG Feature Schema
//!
//! Every prediction starts from the same nine numbers, in the same order the
//! scaler and model were fitted on. This crate owns that order and turns
//! whatever the caller hands us (a slice of floats, a JSON array, a JSON
//! object keyed by field name, or raw form fields) into a [`FeatureVector`].
//!
//! Validation is about shape and type only:
//!
//! - exactly [`FEATURE_COUNT`] values, or every named field present once
//! - each value is a finite number (numeric strings are accepted, the way a
//!   form posts them)
//!
//! There are no value ranges. A negative year or a negative emission factor
//! goes through untouched; the artifacts decide what that means.
//!
//! ## Example
//!
//! ```
//! use features::{FeatureField, FeatureInput, FeatureVector};
//! use serde_json::json;
//!
//! let input: FeatureInput = serde_json::from_value(json!(
//!     [111, 2016, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01]
//! )).unwrap();
//!
//! let vector = input.to_vector().unwrap();
//! assert_eq!(vector.get(FeatureField::Year), 2016.0);
//! assert_eq!(vector, FeatureVector::default());
//! ```

mod error;
mod field;
mod input;
mod vector;

pub use crate::error::FeatureError;
pub use crate::field::{schema, FeatureField, FieldSpec, FEATURE_COUNT};
pub use crate::input::{parse_text, parse_value, vector_from_pairs, FeatureInput};
pub use crate::vector::FeatureVector;
