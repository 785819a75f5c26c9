//! # Carbon AI
//!
//! Calculators and machine-learning wrappers for a carbon credit trading
//! platform.
//!
//! ## Features
//!
//! - Daily price series handling with optional volume and sentiment columns
//! - Iterative multi-day price forecasting around a single-step regression
//!   model (random forest, linear, or any [`models::RegressionModel`])
//! - Emission-factor footprint accounting across energy, transport, food,
//!   goods and home activities
//! - Carbon reduction project analysis with a classifier/regressor pair
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use carbon_ai::data::DataLoader;
//! use carbon_ai::forecast::PriceForecaster;
//! use carbon_ai::models::RandomForest;
//!
//! # fn main() -> carbon_ai::Result<()> {
//! // Load historical prices
//! let history = DataLoader::from_csv("prices.csv")?;
//!
//! // Train a single-step model and forecast 30 days ahead
//! let mut forecaster = PriceForecaster::untrained();
//! forecaster.train(&history, &RandomForest::default())?;
//! let forecast = forecaster.forecast(&history, 30)?;
//!
//! for point in forecast.points() {
//!     println!("{}: {:.2}", point.date, point.predicted_price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod features;
pub mod footprint;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod project;

// Re-export commonly used types
pub use crate::data::{DataLoader, PricePoint, PriceSeries, SeriesSchema};
pub use crate::error::{CarbonError, Result};
pub use crate::footprint::{ActivityProfile, FootprintCalculator, FootprintReport};
pub use crate::forecast::{ForecastPoint, PriceForecast, PriceForecaster, ScalingPolicy};
pub use crate::models::{ClassifierModel, RegressionModel};
pub use crate::project::{ProjectAnalyzer, ProjectAssessment, ProjectRecord};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
