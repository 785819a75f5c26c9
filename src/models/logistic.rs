//! Logistic regression classifier for binary project outcomes
//!
//! Fitted with plain batch gradient descent over ndarray. The probability
//! output feeds the project analyzer's success estimate.

use crate::error::{CarbonError, Result};
use crate::models::ClassifierModel;
use ndarray::{Array1, Array2};

/// Logistic regression configuration
#[derive(Debug, Clone)]
pub struct LogisticModel {
    learning_rate: f64,
    max_iterations: usize,
    tolerance: f64,
}

impl Default for LogisticModel {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

impl LogisticModel {
    /// Create a configuration with default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the learning rate
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Override the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Fit the classifier on feature rows and boolean labels
    pub fn fit(&self, x: &[Vec<f64>], y: &[bool]) -> Result<TrainedLogisticModel> {
        if x.is_empty() || x.len() != y.len() {
            return Err(CarbonError::InvalidInput(format!(
                "Training set has {} feature rows and {} labels",
                x.len(),
                y.len()
            )));
        }

        let n = x.len();
        let width = x[0].len();
        let flat: Vec<f64> = x.iter().flatten().copied().collect();
        let records = Array2::from_shape_vec((n, width), flat)
            .map_err(|e| CarbonError::DataError(format!("Cannot build matrix: {}", e)))?;
        let labels = Array1::from_iter(y.iter().map(|&b| if b { 1.0 } else { 0.0 }));

        let mut weights = Array1::<f64>::zeros(width);
        let mut intercept = 0.0;
        let mut previous_cost = f64::INFINITY;

        for iteration in 0..self.max_iterations {
            let linear = records.dot(&weights) + intercept;
            let predictions = linear.mapv(sigmoid);
            let errors = &predictions - &labels;

            let weight_gradient = records.t().dot(&errors) / n as f64;
            let intercept_gradient = errors.sum() / n as f64;
            weights = weights - self.learning_rate * &weight_gradient;
            intercept -= self.learning_rate * intercept_gradient;

            let cost = log_loss(&predictions, &labels);
            if (previous_cost - cost).abs() < self.tolerance {
                log::debug!("Logistic fit converged after {} iterations", iteration + 1);
                break;
            }
            previous_cost = cost;
        }

        log::info!("Trained logistic regression on {} samples", n);

        Ok(TrainedLogisticModel {
            name: "Logistic Regression".to_string(),
            weights,
            intercept,
        })
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn log_loss(predictions: &Array1<f64>, labels: &Array1<f64>) -> f64 {
    let eps = 1e-12;
    let n = predictions.len() as f64;
    predictions
        .iter()
        .zip(labels.iter())
        .map(|(&p, &y)| {
            let p = p.clamp(eps, 1.0 - eps);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum::<f64>()
        / n
}

/// A fitted logistic regression classifier
#[derive(Debug, Clone)]
pub struct TrainedLogisticModel {
    name: String,
    weights: Array1<f64>,
    intercept: f64,
}

impl ClassifierModel for TrainedLogisticModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        let probability = self.predict_probability(features)?;
        Ok(if probability >= 0.5 { 1.0 } else { 0.0 })
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.weights.len() {
            return Err(CarbonError::InvalidInput(format!(
                "Feature row has {} columns but the classifier was trained on {}",
                features.len(),
                self.weights.len()
            )));
        }

        let linear: f64 = features
            .iter()
            .zip(self.weights.iter())
            .map(|(f, w)| f * w)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(linear))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_midpoint_and_tails() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-10);
        assert!(sigmoid(100.0) > 0.99);
        assert!(sigmoid(-100.0) < 0.01);
    }

    #[test]
    fn separates_a_simple_threshold() {
        let x: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64 / 10.0]).collect();
        let y: Vec<bool> = (0..40).map(|i| i >= 20).collect();

        let model = LogisticModel::new()
            .with_learning_rate(0.5)
            .with_max_iterations(5000)
            .fit(&x, &y)
            .unwrap();

        assert!(model.predict_probability(&[0.0]).unwrap() < 0.5);
        assert!(model.predict_probability(&[3.9]).unwrap() > 0.5);
        assert_eq!(model.predict(&[3.9]).unwrap(), 1.0);
    }

    #[test]
    fn rejects_wrong_feature_width() {
        let x = vec![vec![0.0], vec![1.0]];
        let y = vec![false, true];
        let model = LogisticModel::new().fit(&x, &y).unwrap();
        assert!(model.predict_probability(&[1.0, 2.0]).is_err());
    }
}
