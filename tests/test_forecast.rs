use carbon_ai::data::{PricePoint, PriceSeries, SeriesSchema};
use carbon_ai::error::{CarbonError, Result};
use carbon_ai::forecast::{PriceForecaster, ScalingPolicy};
use carbon_ai::models::RegressionModel;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::rc::Rc;

/// Stub model returning a fixed value
#[derive(Debug)]
struct FixedModel(f64);

impl RegressionModel for FixedModel {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}

/// Stub model that records every feature row it is asked to predict from
#[derive(Debug)]
struct RecordingModel {
    calls: Rc<RefCell<Vec<Vec<f64>>>>,
    value: f64,
}

impl RegressionModel for RecordingModel {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        self.calls.borrow_mut().push(features.to_vec());
        Ok(self.value)
    }

    fn name(&self) -> &str {
        "Recording"
    }
}

/// Stub model returning a scripted sequence of values
#[derive(Debug)]
struct ScriptedModel {
    values: Vec<f64>,
    next: RefCell<usize>,
}

impl ScriptedModel {
    fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            next: RefCell::new(0),
        }
    }
}

impl RegressionModel for ScriptedModel {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        let mut next = self.next.borrow_mut();
        let value = self.values[*next % self.values.len()];
        *next += 1;
        Ok(value)
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn history() -> PriceSeries {
    PriceSeries::from_prices(date("2023-01-01"), &[10.5, 10.7, 10.8, 10.6, 10.9]).unwrap()
}

fn history_with_extras() -> PriceSeries {
    let prices = [10.5, 10.7, 10.8, 10.6, 10.9, 11.0, 11.2, 11.1];
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint {
            date: date("2023-01-01") + chrono::Duration::days(i as i64),
            price,
            volume: Some(1000.0 + i as f64 * 10.0),
            sentiment: Some(0.1 * i as f64),
        })
        .collect();
    PriceSeries::new(points).unwrap()
}

#[test]
fn forecast_has_exact_horizon_and_consecutive_dates() {
    let forecaster = PriceForecaster::new(Box::new(FixedModel(11.0)), SeriesSchema::price_only());
    let forecast = forecaster.forecast(&history(), 3).unwrap();

    assert_eq!(forecast.len(), 3);
    assert_eq!(
        forecast.dates(),
        vec![date("2023-01-06"), date("2023-01-07"), date("2023-01-08")]
    );
    assert_eq!(forecast.values(), vec![11.0, 11.0, 11.0]);
}

#[test]
fn scripted_predictions_come_back_in_generation_order() {
    let model = ScriptedModel::new(vec![11.0, 11.2, 11.1]);
    let forecaster = PriceForecaster::new(Box::new(model), SeriesSchema::price_only());
    let forecast = forecaster.forecast(&history(), 3).unwrap();

    assert_eq!(forecast.values(), vec![11.0, 11.2, 11.1]);
    assert_eq!(
        forecast.dates(),
        vec![date("2023-01-06"), date("2023-01-07"), date("2023-01-08")]
    );
}

#[test]
fn zero_horizon_is_invalid_input() {
    let forecaster = PriceForecaster::new(Box::new(FixedModel(11.0)), SeriesSchema::price_only());
    match forecaster.forecast(&history(), 0) {
        Err(CarbonError::InvalidInput(_)) => {}
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn untrained_forecaster_is_model_not_ready() {
    let forecaster = PriceForecaster::untrained();
    match forecaster.forecast(&history(), 5) {
        Err(CarbonError::ModelNotReady(_)) => {}
        other => panic!("Expected ModelNotReady, got {:?}", other),
    }
}

#[test]
fn schema_mismatch_is_invalid_input() {
    let forecaster = PriceForecaster::new(Box::new(FixedModel(11.0)), SeriesSchema::price_only());
    match forecaster.forecast(&history_with_extras(), 3) {
        Err(CarbonError::InvalidInput(_)) => {}
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn forecast_is_deterministic_with_a_deterministic_model() {
    let forecaster = PriceForecaster::new(Box::new(FixedModel(10.75)), SeriesSchema::price_only());
    let first = forecaster.forecast(&history(), 30).unwrap();
    let second = forecaster.forecast(&history(), 30).unwrap();
    assert_eq!(first, second);
}

#[test]
fn model_is_invoked_once_per_step_on_a_growing_series() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let model = RecordingModel {
        calls: Rc::clone(&calls),
        value: 20.0,
    };
    let forecaster = PriceForecaster::new(Box::new(model), SeriesSchema::price_only());
    let forecast = forecaster.forecast(&history(), 4).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.len(), 4);
    assert_eq!(forecast.len(), 4);

    // The synthetic 20.0 points pull the trailing statistics upward, so every
    // step sees a different feature row for the (growing) working series.
    for pair in calls.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn feature_width_is_stable_across_a_run() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let model = RecordingModel {
        calls: Rc::clone(&calls),
        value: 11.5,
    };
    let schema = SeriesSchema {
        has_volume: true,
        has_sentiment: true,
    };
    let forecaster = PriceForecaster::new(Box::new(model), schema);
    forecaster.forecast(&history_with_extras(), 6).unwrap();

    let calls = calls.borrow();
    assert_eq!(calls.len(), 6);
    assert!(calls.iter().all(|row| row.len() == 7));
}

#[test]
fn price_only_runs_use_four_features() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let model = RecordingModel {
        calls: Rc::clone(&calls),
        value: 11.5,
    };
    let forecaster = PriceForecaster::new(Box::new(model), SeriesSchema::price_only());
    forecaster.forecast(&history(), 5).unwrap();

    assert!(calls.borrow().iter().all(|row| row.len() == 4));
}

#[test]
fn fit_once_policy_also_returns_full_forecast() {
    let forecaster = PriceForecaster::new(Box::new(FixedModel(11.0)), SeriesSchema::price_only())
        .with_scaling_policy(ScalingPolicy::FitOnce);
    let forecast = forecaster.forecast(&history(), 10).unwrap();

    assert_eq!(forecast.len(), 10);
    assert!(forecast.values().iter().all(|v| *v == 11.0));
}

#[test]
fn forecast_serializes_to_json_and_csv() {
    let forecaster = PriceForecaster::new(Box::new(FixedModel(11.0)), SeriesSchema::price_only());
    let forecast = forecaster.forecast(&history(), 2).unwrap();

    let json = forecast.to_json().unwrap();
    assert!(json.contains("2023-01-06"));

    let mut buffer = Vec::new();
    forecast.write_csv(&mut buffer).unwrap();
    let csv_text = String::from_utf8(buffer).unwrap();
    assert!(csv_text.starts_with("date,predicted_price"));
    assert!(csv_text.contains("2023-01-07"));
}
