//! Model seams for the forecasting and project-analysis wrappers
//!
//! The forecaster and the project analyzer are written against these traits
//! so the statistical machinery stays swappable and the wrappers stay
//! testable with stub models.

use crate::error::Result;
use std::fmt::Debug;

/// A trained single-output regression model
pub trait RegressionModel: Debug {
    /// Predict one value from a feature row
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// A trained binary classifier with probability output
pub trait ClassifierModel: Debug {
    /// Predict the class label as 0.0 or 1.0
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Predict the probability of the positive class
    fn predict_probability(&self, features: &[f64]) -> Result<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod linear;
pub mod logistic;
pub mod random_forest;

pub use linear::{LinearModel, TrainedLinearModel};
pub use logistic::{LogisticModel, TrainedLogisticModel};
pub use random_forest::{RandomForest, TrainedRandomForest};
