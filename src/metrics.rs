//! Accuracy metrics for evaluating price forecasts

use crate::error::{CarbonError, Result};

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ForecastMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
}

impl std::fmt::Display for ForecastMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:  {:.4}", self.mae)?;
        writeln!(f, "  MSE:  {:.4}", self.mse)?;
        writeln!(f, "  RMSE: {:.4}", self.rmse)?;
        writeln!(f, "  MAPE: {:.4}%", self.mape)?;
        Ok(())
    }
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn evaluate_forecast(forecast: &[f64], actual: &[f64]) -> Result<ForecastMetrics> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(CarbonError::InvalidInput(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    let mape = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
        .sum::<f64>()
        / n;

    Ok(ForecastMetrics {
        mae,
        mse,
        rmse,
        mape,
    })
}

/// Split a dataset into training and test sets by a trailing ratio
pub fn train_test_split<T: Clone>(data: &[T], test_ratio: f64) -> (Vec<T>, Vec<T>) {
    if data.is_empty() || test_ratio <= 0.0 || test_ratio >= 1.0 {
        return (data.to_vec(), Vec::new());
    }

    let test_size = (data.len() as f64 * test_ratio).round() as usize;
    let train_size = data.len() - test_size;

    let train = data[..train_size].to_vec();
    let test = data[train_size..].to_vec();

    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn metrics_match_hand_computation() {
        let forecast = vec![10.0, 11.0, 12.0];
        let actual = vec![11.0, 11.0, 10.0];
        let metrics = evaluate_forecast(&forecast, &actual).unwrap();

        assert_approx_eq!(metrics.mae, 1.0);
        assert_approx_eq!(metrics.mse, 5.0 / 3.0);
        assert_approx_eq!(metrics.rmse, (5.0f64 / 3.0).sqrt());
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(evaluate_forecast(&[1.0], &[1.0, 2.0]).is_err());
        assert!(evaluate_forecast(&[], &[]).is_err());
    }

    #[test]
    fn split_keeps_order() {
        let data: Vec<i32> = (0..10).collect();
        let (train, test) = train_test_split(&data, 0.2);
        assert_eq!(train.len(), 8);
        assert_eq!(test, vec![8, 9]);
    }
}
