//! Feature engineering for the price models
//!
//! Maps a price series to a fixed-width numeric matrix: raw price, 7- and
//! 30-point trailing means, 7-point trailing standard deviation, and when the
//! series carries them, raw volume, 7-point trailing volume mean and raw
//! sentiment. Rows where a trailing window is not yet defined use 0.0, so the
//! matrix always has one row per observation.

use crate::data::{PriceSeries, SeriesSchema};
use crate::error::{CarbonError, Result};
use statrs::statistics::Statistics;

/// Short trailing window (mean and standard deviation)
pub const SHORT_WINDOW: usize = 7;
/// Long trailing window (mean only)
pub const LONG_WINDOW: usize = 30;

/// A row-major feature matrix with a fixed column count
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
    width: usize,
}

impl FeatureMatrix {
    fn new(rows: Vec<Vec<f64>>, width: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == width));
        Self { rows, width }
    }

    /// Get the rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Get the last row
    pub fn last_row(&self) -> &[f64] {
        &self.rows[self.rows.len() - 1]
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Number of feature columns produced for a given column set
pub fn feature_width(schema: SeriesSchema) -> usize {
    let mut width = 4;
    if schema.has_volume {
        width += 2;
    }
    if schema.has_sentiment {
        width += 1;
    }
    width
}

/// Build the feature matrix for a series
pub fn build_features(series: &PriceSeries) -> Result<FeatureMatrix> {
    if series.is_empty() {
        return Err(CarbonError::InvalidInput(
            "Cannot build features for an empty series".to_string(),
        ));
    }

    let schema = series.schema();
    let width = feature_width(schema);
    let prices = series.prices();
    let volumes = series.volumes();
    let sentiments = series.sentiments();

    let mut rows = Vec::with_capacity(prices.len());
    for i in 0..prices.len() {
        let mut row = Vec::with_capacity(width);
        row.push(prices[i]);
        row.push(trailing_mean(&prices, i, SHORT_WINDOW));
        row.push(trailing_mean(&prices, i, LONG_WINDOW));
        row.push(trailing_std(&prices, i, SHORT_WINDOW));
        if let Some(volumes) = &volumes {
            row.push(volumes[i]);
            row.push(trailing_mean(volumes, i, SHORT_WINDOW));
        }
        if let Some(sentiments) = &sentiments {
            row.push(sentiments[i]);
        }
        rows.push(row);
    }

    Ok(FeatureMatrix::new(rows, width))
}

/// Mean of the `window` values ending at `index`, or 0.0 when undefined
fn trailing_mean(values: &[f64], index: usize, window: usize) -> f64 {
    if index + 1 < window {
        return 0.0;
    }
    values[index + 1 - window..=index].mean()
}

/// Sample standard deviation of the `window` values ending at `index`,
/// or 0.0 when undefined
fn trailing_std(values: &[f64], index: usize, window: usize) -> f64 {
    if index + 1 < window {
        return 0.0;
    }
    values[index + 1 - window..=index].std_dev()
}

/// Per-column standardization fitted from a feature matrix
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and scales from a matrix
    ///
    /// A column with zero variance gets a scale of 1.0 so it passes through
    /// centered instead of dividing by zero.
    pub fn fit(matrix: &FeatureMatrix) -> Result<Self> {
        if matrix.is_empty() {
            return Err(CarbonError::InvalidInput(
                "Cannot fit a scaler on an empty matrix".to_string(),
            ));
        }

        let width = matrix.width();
        let mut means = Vec::with_capacity(width);
        let mut scales = Vec::with_capacity(width);
        for col in 0..width {
            let column: Vec<f64> = matrix.rows().iter().map(|row| row[col]).collect();
            let mean = (&column).mean();
            let std = (&column).population_std_dev();
            means.push(mean);
            scales.push(if std > 0.0 { std } else { 1.0 });
        }

        Ok(Self { means, scales })
    }

    /// Fit column means and scales from plain feature rows
    pub fn fit_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(CarbonError::InvalidInput(
                "Cannot fit a scaler on an empty matrix".to_string(),
            ));
        }
        let width = rows[0].len();
        if rows.iter().any(|r| r.len() != width) {
            return Err(CarbonError::InvalidInput(
                "Feature rows have inconsistent widths".to_string(),
            ));
        }
        Self::fit(&FeatureMatrix::new(rows.to_vec(), width))
    }

    /// Scaler that leaves features unchanged (for stub-model tests)
    pub fn identity(width: usize) -> Self {
        Self {
            means: vec![0.0; width],
            scales: vec![1.0; width],
        }
    }

    /// Standardize a whole matrix
    pub fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix> {
        if matrix.width() != self.means.len() {
            return Err(CarbonError::InvalidInput(format!(
                "Matrix has {} columns but the scaler was fitted on {}",
                matrix.width(),
                self.means.len()
            )));
        }

        let rows = matrix
            .rows()
            .iter()
            .map(|row| self.transform_row_unchecked(row))
            .collect();
        Ok(FeatureMatrix::new(rows, matrix.width()))
    }

    /// Standardize a single feature row
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.means.len() {
            return Err(CarbonError::InvalidInput(format!(
                "Row has {} columns but the scaler was fitted on {}",
                row.len(),
                self.means.len()
            )));
        }
        Ok(self.transform_row_unchecked(row))
    }

    fn transform_row_unchecked(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .enumerate()
            .map(|(i, v)| (v - self.means[i]) / self.scales[i])
            .collect()
    }

    /// Fit and transform in one step
    pub fn fit_transform(matrix: &FeatureMatrix) -> Result<(Self, FeatureMatrix)> {
        let scaler = Self::fit(matrix)?;
        let scaled = scaler.transform(matrix)?;
        Ok((scaler, scaled))
    }
}
