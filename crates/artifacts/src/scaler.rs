use serde::{Deserialize, Serialize};

use crate::document;
use crate::{Scaler, TransformError};

/// Per-feature standardization: `(x - mean) / scale`.
///
/// `with_mean = false` skips centering and `with_std = false` skips scaling,
/// the same switches a fitted standard scaler carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub n_features_in: usize,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default = "default_true")]
    pub with_mean: bool,
    #[serde(default = "default_true")]
    pub with_std: bool,
}

fn default_true() -> bool {
    true
}

impl StandardScaler {
    /// Scaler that both centers and scales, sized from `mean`.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            n_features_in: mean.len(),
            mean,
            scale,
            with_mean: true,
            with_std: true,
        }
    }

    /// Checks the fitted parameters agree with each other.
    pub fn validate(&self) -> Result<(), String> {
        if self.n_features_in == 0 {
            return Err("n_features_in must be at least 1".into());
        }
        if self.mean.len() != self.n_features_in {
            return Err(format!(
                "mean has {} entries, expected {}",
                self.mean.len(),
                self.n_features_in
            ));
        }
        if self.scale.len() != self.n_features_in {
            return Err(format!(
                "scale has {} entries, expected {}",
                self.scale.len(),
                self.n_features_in
            ));
        }
        if let Some(idx) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(format!("mean[{idx}] is not finite"));
        }
        if self.with_std {
            if let Some(idx) = self
                .scale
                .iter()
                .position(|s| !s.is_finite() || *s == 0.0)
            {
                return Err(format!("scale[{idx}] must be finite and non-zero"));
            }
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn name(&self) -> &str {
        "standard_scaler"
    }

    fn n_features(&self) -> usize {
        self.n_features_in
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, TransformError> {
        if row.len() != self.n_features_in {
            return Err(TransformError::ShapeMismatch {
                expected: self.n_features_in,
                got: row.len(),
            });
        }
        // Parameters are checked at load; zip never indexes past them.
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .enumerate()
            .map(|(idx, (x, (mean, scale)))| {
                let mut v = *x;
                if self.with_mean {
                    v -= mean;
                }
                if self.with_std {
                    v /= scale;
                }
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(TransformError::NonFinite { index: idx })
                }
            })
            .collect()
    }
}

/// Every scaler family a scaler document can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    StandardScaler(StandardScaler),
}

impl ScalerArtifact {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ScalerArtifact::StandardScaler(inner) => inner.validate(),
        }
    }

    /// Serializes into a versioned artifact document.
    pub fn to_document(&self) -> Result<String, serde_json::Error> {
        document::encode(self)
    }

    /// Parses a versioned artifact document without validating it.
    pub fn from_document(json: &str) -> Result<Self, serde_json::Error> {
        document::decode(json.as_bytes())
    }

    fn inner(&self) -> &dyn Scaler {
        match self {
            ScalerArtifact::StandardScaler(inner) => inner,
        }
    }
}

impl From<StandardScaler> for ScalerArtifact {
    fn from(inner: StandardScaler) -> Self {
        ScalerArtifact::StandardScaler(inner)
    }
}

impl Scaler for ScalerArtifact {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, TransformError> {
        self.inner().transform(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> StandardScaler {
        StandardScaler::new(vec![1.0, 10.0, 0.0], vec![2.0, 5.0, 0.5])
    }

    #[test]
    fn standardizes_each_feature() {
        let out = scaler().transform(&[3.0, 0.0, 1.0]).unwrap();
        assert_eq!(out, vec![1.0, -2.0, 2.0]);
    }

    #[test]
    fn flags_disable_centering_and_scaling() {
        let mut s = scaler();
        s.with_mean = false;
        assert_eq!(s.transform(&[3.0, 0.0, 1.0]).unwrap(), vec![1.5, 0.0, 2.0]);

        s.with_mean = true;
        s.with_std = false;
        assert_eq!(s.transform(&[3.0, 0.0, 1.0]).unwrap(), vec![2.0, -10.0, 1.0]);
    }

    #[test]
    fn rejects_wrong_width() {
        let err = scaler().transform(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            TransformError::ShapeMismatch {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn truncated_copy_yields_short_row_without_panicking() {
        let mut s = scaler();
        s.scale.pop();
        assert_eq!(s.transform(&[3.0, 0.0, 1.0]).unwrap(), vec![1.0, -2.0]);
    }

    #[test]
    fn overflow_is_reported() {
        let s = StandardScaler::new(vec![0.0], vec![1e-300]);
        let err = s.transform(&[1e300]).unwrap_err();
        assert_eq!(err, TransformError::NonFinite { index: 0 });
    }

    #[test]
    fn validate_catches_zero_scale() {
        let s = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 0.0]);
        assert_eq!(
            s.validate().unwrap_err(),
            "scale[1] must be finite and non-zero"
        );

        let mut unscaled = s.clone();
        unscaled.with_std = false;
        assert!(unscaled.validate().is_ok());
    }

    #[test]
    fn validate_catches_length_and_nan() {
        let mut s = scaler();
        s.n_features_in = 4;
        assert!(s.validate().unwrap_err().contains("mean has 3 entries"));

        let mut s = scaler();
        s.scale.pop();
        assert_eq!(s.validate().unwrap_err(), "scale has 2 entries, expected 3");

        let s = StandardScaler::new(vec![f64::NAN, 0.0, 0.0], vec![1.0; 3]);
        assert_eq!(s.validate().unwrap_err(), "mean[0] is not finite");
    }

    #[test]
    fn document_roundtrip_is_tagged() {
        let artifact = ScalerArtifact::from(scaler());
        let doc = artifact.to_document().unwrap();
        assert!(doc.contains("\"kind\": \"standard_scaler\""));
        assert!(doc.contains("\"format_version\": 1"));
        assert_eq!(ScalerArtifact::from_document(&doc).unwrap(), artifact);
    }

    #[test]
    fn flags_default_to_true() {
        let json = r#"{"format_version":1,"kind":"standard_scaler","n_features_in":1,"mean":[0],"scale":[1]}"#;
        let ScalerArtifact::StandardScaler(s) = ScalerArtifact::from_document(json).unwrap();
        assert!(s.with_mean && s.with_std);
    }
}
