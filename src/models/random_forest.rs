//! Random forest regression backed by smartcore

use crate::error::{CarbonError, Result};
use crate::models::RegressionModel;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Random forest regressor configuration
#[derive(Debug, Clone)]
pub struct RandomForest {
    name: String,
    n_trees: u16,
    max_depth: u16,
    seed: u64,
}

impl Default for RandomForest {
    fn default() -> Self {
        // 100 trees, depth 10, fixed seed: the stock configuration used for
        // the carbon credit price and project-reduction regressors.
        Self::new(100, 10, 42)
    }
}

impl RandomForest {
    /// Create a random forest configuration
    pub fn new(n_trees: u16, max_depth: u16, seed: u64) -> Self {
        Self {
            name: format!("Random Forest (trees={}, depth={})", n_trees, max_depth),
            n_trees,
            max_depth,
            seed,
        }
    }

    /// Get the configuration name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fit the forest on feature rows and targets
    pub fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<TrainedRandomForest> {
        if x.is_empty() || x.len() != y.len() {
            return Err(CarbonError::InvalidInput(format!(
                "Training set has {} feature rows and {} targets",
                x.len(),
                y.len()
            )));
        }

        let rows: Vec<&[f64]> = x.iter().map(|row| row.as_slice()).collect();
        let matrix = DenseMatrix::from_2d_array(&rows)
            .map_err(|e| CarbonError::DataError(format!("Cannot build matrix: {}", e)))?;

        let parameters = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_trees.into())
            .with_max_depth(self.max_depth)
            .with_min_samples_split(2)
            .with_min_samples_leaf(1)
            .with_seed(self.seed);

        let inner = RandomForestRegressor::fit(&matrix, &y.to_vec(), parameters)
            .map_err(|e| CarbonError::PredictionFailure(format!("Forest training failed: {}", e)))?;

        log::info!("Trained {} on {} samples", self.name, x.len());

        Ok(TrainedRandomForest {
            name: self.name.clone(),
            width: x[0].len(),
            inner,
        })
    }
}

/// A fitted random forest regressor
#[derive(Debug)]
pub struct TrainedRandomForest {
    name: String,
    width: usize,
    inner: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

impl TrainedRandomForest {
    /// Number of feature columns the forest was trained on
    pub fn feature_width(&self) -> usize {
        self.width
    }
}

impl RegressionModel for TrainedRandomForest {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.width {
            return Err(CarbonError::InvalidInput(format!(
                "Feature row has {} columns but the forest was trained on {}",
                features.len(),
                self.width
            )));
        }

        let matrix = DenseMatrix::from_2d_array(&[features])
            .map_err(|e| CarbonError::DataError(format!("Cannot build matrix: {}", e)))?;
        let predictions = self
            .inner
            .predict(&matrix)
            .map_err(|e| CarbonError::PredictionFailure(e.to_string()))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| CarbonError::PredictionFailure("Forest returned no value".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_and_predicts_a_linear_trend() {
        let x: Vec<Vec<f64>> = (0..60).map(|i| vec![i as f64, (i * 2) as f64]).collect();
        let y: Vec<f64> = (0..60).map(|i| 5.0 + i as f64).collect();

        let model = RandomForest::default().fit(&x, &y).unwrap();
        let prediction = model.predict(&[30.0, 60.0]).unwrap();
        assert!(prediction.is_finite());
        assert!(prediction > 5.0 && prediction < 65.0);
    }

    #[test]
    fn rejects_mismatched_training_data() {
        let x = vec![vec![1.0, 2.0]];
        let y = vec![1.0, 2.0];
        assert!(RandomForest::default().fit(&x, &y).is_err());
    }

    #[test]
    fn rejects_wrong_feature_width() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, i as f64]).collect();
        let y: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let model = RandomForest::new(10, 4, 1).fit(&x, &y).unwrap();
        assert!(model.predict(&[1.0]).is_err());
    }
}
