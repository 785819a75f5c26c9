//! Iterative multi-step price forecasting
//!
//! Wraps a single-step regression model and produces a multi-day forecast by
//! repeatedly predicting one step ahead, appending the prediction to a working
//! copy of the series, recomputing the trailing-window features from scratch
//! and predicting again. Full recomputation per step is O(horizon × length)
//! but keeps every step's statistics consistent over all prior real and
//! synthetic data.

use crate::data::{PricePoint, PriceSeries, SeriesSchema};
use crate::error::{CarbonError, Result};
use crate::features::{build_features, FeatureMatrix, StandardScaler};
use crate::metrics::{evaluate_forecast, ForecastMetrics};
use crate::models::{RandomForest, RegressionModel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// How feature standardization behaves across the forecast loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalingPolicy {
    /// Refit the scaler on the growing working series at every step.
    ///
    /// Later synthetic points are then scaled with statistics partly derived
    /// from earlier synthetic points, which can compound drift over long
    /// horizons. This is the platform's historical behavior and the default.
    #[default]
    RefitEachStep,
    /// Fit the scaler once on the historical series and reuse it for every
    /// step of the forecast.
    FitOnce,
}

/// A single forecasted point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast date
    pub date: NaiveDate,
    /// Predicted credit price
    pub predicted_price: f64,
}

/// A multi-day price forecast, one point per day in chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceForecast {
    points: Vec<ForecastPoint>,
}

impl PriceForecast {
    /// Get the forecasted points
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Number of forecasted days
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Predicted prices in chronological order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_price).collect()
    }

    /// Forecast dates in chronological order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Serialize the forecast to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.points)
            .map_err(|e| CarbonError::DataError(format!("Cannot serialize forecast: {}", e)))
    }

    /// Write the forecast as CSV with a `date,predicted_price` header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["date", "predicted_price"])?;
        for point in &self.points {
            csv_writer.write_record([
                point.date.to_string(),
                point.predicted_price.to_string(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Multi-step price forecaster around a single-step regression model
///
/// The model and the column set are owned state, fixed when the forecaster is
/// trained (or injected for testing). Every forecast call works on its own
/// copy of the caller's series; nothing shared is mutated.
#[derive(Debug)]
pub struct PriceForecaster {
    model: Option<Box<dyn RegressionModel>>,
    schema: Option<SeriesSchema>,
    scaling: ScalingPolicy,
}

impl PriceForecaster {
    /// Create a forecaster with no model; `train` or `set_model` must be
    /// called before forecasting
    pub fn untrained() -> Self {
        Self {
            model: None,
            schema: None,
            scaling: ScalingPolicy::default(),
        }
    }

    /// Create a forecaster around an already-trained model
    pub fn new(model: Box<dyn RegressionModel>, schema: SeriesSchema) -> Self {
        Self {
            model: Some(model),
            schema: Some(schema),
            scaling: ScalingPolicy::default(),
        }
    }

    /// Select the scaling policy for forecast runs
    pub fn with_scaling_policy(mut self, scaling: ScalingPolicy) -> Self {
        self.scaling = scaling;
        self
    }

    /// Replace the wrapped model and column set
    pub fn set_model(&mut self, model: Box<dyn RegressionModel>, schema: SeriesSchema) {
        self.model = Some(model);
        self.schema = Some(schema);
    }

    /// Check whether a model is available
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Fit a random forest on a historical series and adopt it
    ///
    /// Each row's target is the next day's price, so the fitted forest is a
    /// single-step predictor; the last row has no target and is dropped.
    pub fn train(&mut self, history: &PriceSeries, forest: &RandomForest) -> Result<()> {
        if history.len() < 2 {
            return Err(CarbonError::InvalidInput(
                "Training requires at least two observations".to_string(),
            ));
        }

        let raw = build_features(history)?;
        let (_, scaled) = StandardScaler::fit_transform(&raw)?;
        let prices = history.prices();

        let x: Vec<Vec<f64>> = scaled.rows()[..scaled.len() - 1].to_vec();
        let y: Vec<f64> = prices[1..].to_vec();

        let trained = forest.fit(&x, &y)?;
        self.model = Some(Box::new(trained));
        self.schema = Some(history.schema());
        Ok(())
    }

    /// Produce a `horizon`-day forecast from a historical series
    ///
    /// Returns exactly `horizon` points with dates increasing one calendar day
    /// at a time, starting the day after the last historical date. Any step
    /// failure aborts the whole forecast; no partial result is returned.
    pub fn forecast(&self, history: &PriceSeries, horizon: usize) -> Result<PriceForecast> {
        if horizon == 0 {
            return Err(CarbonError::InvalidInput(
                "Forecast horizon must be positive".to_string(),
            ));
        }
        let model = self.model.as_deref().ok_or_else(|| {
            CarbonError::ModelNotReady("Forecast requested before training".to_string())
        })?;
        let schema = self.schema.ok_or_else(|| {
            CarbonError::ModelNotReady("Forecast requested before training".to_string())
        })?;
        if history.schema() != schema {
            return Err(CarbonError::InvalidInput(
                "Series columns do not match the columns the model was trained on".to_string(),
            ));
        }

        let fixed_scaler = match self.scaling {
            ScalingPolicy::FitOnce => Some(StandardScaler::fit(&build_features(history)?)?),
            ScalingPolicy::RefitEachStep => None,
        };

        let mut working = history.clone();
        let mut points = Vec::with_capacity(horizon);

        for step in 0..horizon {
            let features = self.scaled_features(&working, fixed_scaler.as_ref())?;
            let next_price = model.predict(features.last_row())?;
            let next_date = working.last_date() + chrono::Duration::days(1);
            log::debug!(
                "Forecast step {}: {} -> {:.4}",
                step + 1,
                next_date,
                next_price
            );

            working.push(PricePoint {
                date: next_date,
                price: next_price,
                volume: working.mean_volume(),
                sentiment: working.mean_sentiment(),
            })?;
            points.push(ForecastPoint {
                date: next_date,
                predicted_price: next_price,
            });
        }

        Ok(PriceForecast { points })
    }

    /// Score one-step predictions against an observed series
    ///
    /// Each feature row predicts the following day's price, so the last row
    /// has nothing to compare against and is skipped.
    pub fn evaluate(&self, observed: &PriceSeries) -> Result<ForecastMetrics> {
        let model = self.model.as_deref().ok_or_else(|| {
            CarbonError::ModelNotReady("Evaluation requested before training".to_string())
        })?;
        if observed.len() < 2 {
            return Err(CarbonError::InvalidInput(
                "Evaluation requires at least two observations".to_string(),
            ));
        }

        let features = self.scaled_features(observed, None)?;
        let predictions: Vec<f64> = features.rows()[..features.len() - 1]
            .iter()
            .map(|row| model.predict(row))
            .collect::<Result<_>>()?;

        evaluate_forecast(&predictions, &observed.prices()[1..])
    }

    fn scaled_features(
        &self,
        series: &PriceSeries,
        fixed_scaler: Option<&StandardScaler>,
    ) -> Result<FeatureMatrix> {
        let raw = build_features(series)?;
        match fixed_scaler {
            Some(scaler) => scaler.transform(&raw),
            None => {
                let (_, scaled) = StandardScaler::fit_transform(&raw)?;
                Ok(scaled)
            }
        }
    }
}
