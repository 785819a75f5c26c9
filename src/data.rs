//! Price series data handling for carbon credit markets

use crate::error::{CarbonError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// A single daily observation of a carbon credit market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date
    pub date: NaiveDate,
    /// Credit price
    pub price: f64,
    /// Traded volume, if tracked
    pub volume: Option<f64>,
    /// Market sentiment score, if tracked
    pub sentiment: Option<f64>,
}

impl PricePoint {
    /// Create a price-only observation
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            price,
            volume: None,
            sentiment: None,
        }
    }
}

/// Which optional columns a series carries
///
/// The column set is fixed for the lifetime of a series: every point must
/// carry exactly the columns of the first point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSchema {
    /// Whether the series has a volume column
    pub has_volume: bool,
    /// Whether the series has a sentiment column
    pub has_sentiment: bool,
}

impl SeriesSchema {
    /// Schema with only the mandatory price column
    pub fn price_only() -> Self {
        Self {
            has_volume: false,
            has_sentiment: false,
        }
    }

    fn of(point: &PricePoint) -> Self {
        Self {
            has_volume: point.volume.is_some(),
            has_sentiment: point.sentiment.is_some(),
        }
    }

    fn matches(&self, point: &PricePoint) -> bool {
        *self == Self::of(point)
    }
}

/// An ordered daily price series, strictly increasing by date
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    schema: SeriesSchema,
}

impl PriceSeries {
    /// Create a series from observations
    ///
    /// Validates that the series is non-empty, that dates are strictly
    /// increasing and that every point carries the same column set.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(CarbonError::InvalidInput(
                "Price series must contain at least one point".to_string(),
            ));
        }

        let schema = SeriesSchema::of(&points[0]);
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CarbonError::InvalidInput(format!(
                    "Dates must be strictly increasing: {} followed by {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        for point in &points {
            if !schema.matches(point) {
                return Err(CarbonError::InvalidInput(format!(
                    "Point at {} does not match the series column set",
                    point.date
                )));
            }
        }

        Ok(Self { points, schema })
    }

    /// Create a price-only series of consecutive days (for testing)
    pub fn from_prices(start: NaiveDate, prices: &[f64]) -> Result<Self> {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(start + chrono::Duration::days(i as i64), price))
            .collect();
        Self::new(points)
    }

    /// Append an observation, keeping the series invariants
    pub fn push(&mut self, point: PricePoint) -> Result<()> {
        if point.date <= self.last_date() {
            return Err(CarbonError::InvalidInput(format!(
                "Appended date {} is not after the last date {}",
                point.date,
                self.last_date()
            )));
        }
        if !self.schema.matches(&point) {
            return Err(CarbonError::InvalidInput(format!(
                "Appended point at {} does not match the series column set",
                point.date
            )));
        }
        self.points.push(point);
        Ok(())
    }

    /// Get the observations
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Get the column set
    pub fn schema(&self) -> SeriesSchema {
        self.schema
    }

    /// Get the number of observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// Prices in chronological order
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Volumes in chronological order, if the series carries them
    pub fn volumes(&self) -> Option<Vec<f64>> {
        if !self.schema.has_volume {
            return None;
        }
        Some(self.points.iter().filter_map(|p| p.volume).collect())
    }

    /// Sentiment scores in chronological order, if the series carries them
    pub fn sentiments(&self) -> Option<Vec<f64>> {
        if !self.schema.has_sentiment {
            return None;
        }
        Some(self.points.iter().filter_map(|p| p.sentiment).collect())
    }

    /// Mean traded volume over the whole series
    pub fn mean_volume(&self) -> Option<f64> {
        self.volumes()
            .map(|v| v.iter().sum::<f64>() / v.len() as f64)
    }

    /// Mean sentiment score over the whole series
    pub fn mean_sentiment(&self) -> Option<f64> {
        self.sentiments()
            .map(|s| s.iter().sum::<f64>() / s.len() as f64)
    }
}

/// Data loader for historical price series
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a price series from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(df)
    }

    /// Build a price series from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<PriceSeries> {
        let date_column = Self::detect_date_column(&df)?;
        let price_column = Self::detect_price_column(&df)?;
        let volume_column = Self::detect_column(&df, &["volume", "vol"]);
        let sentiment_column = Self::detect_column(&df, &["sentiment"]);

        let dates = Self::column_as_dates(&df, &date_column)?;
        let prices = Self::column_as_f64(&df, &price_column)?;
        if dates.len() != prices.len() {
            return Err(CarbonError::DataError(format!(
                "Date column has {} parsed values but price column has {}",
                dates.len(),
                prices.len()
            )));
        }

        let volumes = Self::optional_column(&df, &volume_column, prices.len())?;
        let sentiments = Self::optional_column(&df, &sentiment_column, prices.len())?;

        let points = dates
            .into_iter()
            .zip(prices)
            .enumerate()
            .map(|(i, (date, price))| PricePoint {
                date,
                price,
                volume: volumes.as_ref().map(|v| v[i]),
                sentiment: sentiments.as_ref().map(|s| s[i]),
            })
            .collect();

        PriceSeries::new(points)
    }

    /// Detect the date column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        for name in df.get_column_names() {
            let lower_name = name.to_lowercase();
            if lower_name.contains("date") || lower_name.contains("time") {
                return Ok(name.to_string());
            }
        }

        Err(CarbonError::DataError(
            "No date column found in data".to_string(),
        ))
    }

    /// Detect the price column in a DataFrame
    fn detect_price_column(df: &DataFrame) -> Result<String> {
        for name in df.get_column_names() {
            let lower_name = name.to_lowercase();
            if lower_name.contains("price") || lower_name.contains("close") {
                return Ok(name.to_string());
            }
        }

        Err(CarbonError::DataError(
            "No price column found in data".to_string(),
        ))
    }

    /// Extract an optional column, requiring one usable value per price row
    ///
    /// Null cells are dropped during extraction, so a shorter column means the
    /// file had empty cells and the rows can no longer be zipped safely.
    fn optional_column(
        df: &DataFrame,
        column: &Option<String>,
        expected_len: usize,
    ) -> Result<Option<Vec<f64>>> {
        let name = match column {
            Some(name) => name,
            None => return Ok(None),
        };

        let values = Self::column_as_f64(df, name)?;
        if values.len() != expected_len {
            return Err(CarbonError::DataError(format!(
                "Column '{}' has {} usable values but the price column has {}",
                name,
                values.len(),
                expected_len
            )));
        }
        Ok(Some(values))
    }

    /// Detect an optional column by name fragments
    fn detect_column(df: &DataFrame, fragments: &[&str]) -> Option<String> {
        for name in df.get_column_names() {
            let lower_name = name.to_lowercase();
            if fragments.iter().any(|f| lower_name.contains(f)) {
                return Some(name.to_string());
            }
        }

        None
    }

    /// Extract a column as calendar dates
    fn column_as_dates(df: &DataFrame, column_name: &str) -> Result<Vec<NaiveDate>> {
        let col = df.column(column_name).map_err(|e| {
            CarbonError::DataError(format!("Column '{}' not found: {}", column_name, e))
        })?;

        match col.dtype() {
            DataType::Utf8 => col
                .utf8()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|s| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
                        CarbonError::DataError(format!("Cannot parse date '{}': {}", s, e))
                    })
                })
                .collect(),
            DataType::Date => Ok(col
                .date()
                .unwrap()
                .into_iter()
                .flatten()
                .filter_map(|days| {
                    NaiveDate::from_ymd_opt(1970, 1, 1)
                        .unwrap()
                        .checked_add_signed(chrono::Duration::days(days as i64))
                })
                .collect()),
            DataType::Datetime(unit, _) => {
                let ticks_per_second: i64 = match unit {
                    TimeUnit::Nanoseconds => 1_000_000_000,
                    TimeUnit::Microseconds => 1_000_000,
                    TimeUnit::Milliseconds => 1_000,
                };
                Ok(col
                    .datetime()
                    .unwrap()
                    .into_iter()
                    .flatten()
                    .filter_map(|ts| {
                        chrono::DateTime::from_timestamp(ts / ticks_per_second, 0)
                            .map(|dt| dt.date_naive())
                    })
                    .collect())
            }
            other => Err(CarbonError::DataError(format!(
                "Column '{}' has unsupported date type {:?}",
                column_name, other
            ))),
        }
    }

    /// Extract a column as f64 values
    fn column_as_f64(df: &DataFrame, column_name: &str) -> Result<Vec<f64>> {
        let col = df.column(column_name).map_err(|e| {
            CarbonError::DataError(format!("Column '{}' not found: {}", column_name, e))
        })?;

        match col.dtype() {
            DataType::Float64 => Ok(col.f64().unwrap().into_iter().flatten().collect()),
            DataType::Float32 => Ok(col
                .f32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::Int64 => Ok(col
                .i64()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::Int32 => Ok(col
                .i32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            _ => Err(CarbonError::DataError(format!(
                "Column '{}' cannot be converted to f64",
                column_name
            ))),
        }
    }
}
