//! Ordinary least squares regression backed by linfa

use crate::error::{CarbonError, Result};
use crate::models::RegressionModel;
use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{Array1, Array2};

/// Linear regressor configuration
#[derive(Debug, Clone, Default)]
pub struct LinearModel;

impl LinearModel {
    /// Create a linear regressor configuration
    pub fn new() -> Self {
        Self
    }

    /// Fit the regression on feature rows and targets
    pub fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<TrainedLinearModel> {
        if x.is_empty() || x.len() != y.len() {
            return Err(CarbonError::InvalidInput(format!(
                "Training set has {} feature rows and {} targets",
                x.len(),
                y.len()
            )));
        }

        let width = x[0].len();
        let flat: Vec<f64> = x.iter().flatten().copied().collect();
        let records = Array2::from_shape_vec((x.len(), width), flat)
            .map_err(|e| CarbonError::DataError(format!("Cannot build matrix: {}", e)))?;
        let targets = Array1::from_vec(y.to_vec());
        let dataset = Dataset::new(records, targets);

        let inner = LinearRegression::default()
            .fit(&dataset)
            .map_err(|e| CarbonError::PredictionFailure(format!("OLS fit failed: {}", e)))?;

        log::info!("Trained linear regression on {} samples", x.len());

        Ok(TrainedLinearModel {
            name: "Linear Regression".to_string(),
            width,
            inner,
        })
    }
}

/// A fitted linear regressor
#[derive(Debug)]
pub struct TrainedLinearModel {
    name: String,
    width: usize,
    inner: FittedLinearRegression<f64>,
}

impl RegressionModel for TrainedLinearModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.width {
            return Err(CarbonError::InvalidInput(format!(
                "Feature row has {} columns but the model was trained on {}",
                features.len(),
                self.width
            )));
        }

        let input = Array2::from_shape_vec((1, self.width), features.to_vec())
            .map_err(|e| CarbonError::DataError(format!("Cannot build matrix: {}", e)))?;
        let predictions = self.inner.predict(&input);

        predictions
            .get(0)
            .copied()
            .ok_or_else(|| CarbonError::PredictionFailure("OLS returned no value".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
