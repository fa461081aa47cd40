use serde::{Deserialize, Serialize};

use crate::{Model, ModelError};

/// `intercept + Σ coef[i] · x[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub n_features_in: usize,
    pub coef: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            n_features_in: coef.len(),
            coef,
            intercept,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.n_features_in == 0 {
            return Err("n_features_in must be at least 1".into());
        }
        if self.coef.len() != self.n_features_in {
            return Err(format!(
                "coef has {} entries, expected {}",
                self.coef.len(),
                self.n_features_in
            ));
        }
        if let Some(idx) = self.coef.iter().position(|c| !c.is_finite()) {
            return Err(format!("coef[{idx}] is not finite"));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".into());
        }
        Ok(())
    }
}

impl Model for LinearRegressor {
    fn name(&self) -> &str {
        "linear"
    }

    fn n_features(&self) -> usize {
        self.n_features_in
    }

    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features_in || self.coef.len() != self.n_features_in {
            return Err(ModelError::ShapeMismatch {
                expected: self.coef.len(),
                got: row.len(),
            });
        }
        Ok(self.intercept + self.coef.iter().zip(row).map(|(c, x)| c * x).sum::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_product_plus_intercept() {
        let model = LinearRegressor::new(vec![2.0, -1.0, 0.5], 1.0);
        assert_eq!(model.predict(&[1.0, 2.0, 4.0]).unwrap(), 3.0);
    }

    #[test]
    fn wrong_width_is_shape_mismatch() {
        let model = LinearRegressor::new(vec![1.0, 1.0], 0.0);
        assert!(matches!(
            model.predict(&[1.0]),
            Err(ModelError::ShapeMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn validate_checks_lengths_and_finiteness() {
        let mut model = LinearRegressor::new(vec![1.0, 2.0], 0.0);
        assert!(model.validate().is_ok());
        model.intercept = f64::INFINITY;
        assert_eq!(model.validate().unwrap_err(), "intercept is not finite");
        model.intercept = 0.0;
        model.n_features_in = 3;
        assert!(model.validate().unwrap_err().contains("coef has 2 entries"));
    }
}
