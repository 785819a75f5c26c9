use carbon_ai::data::PriceSeries;
use carbon_ai::forecast::PriceForecaster;
use carbon_ai::models::RandomForest;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Carbon AI: Price Forecasting Example");
    println!("====================================\n");

    println!("Creating sample historical data...");
    let history = create_sample_history(180)?;
    println!("Sample data created: {} daily points\n", history.len());

    println!("Training the single-step model...");
    let mut forecaster = PriceForecaster::untrained();
    forecaster.train(&history, &RandomForest::default())?;
    println!("Model trained successfully\n");

    println!("Generating a 30-day forecast...");
    let forecast = forecaster.forecast(&history, 30)?;
    for point in forecast.points().iter().take(10) {
        println!("  {}: {:.2} USD", point.date, point.predicted_price);
    }
    println!("  ... {} points total\n", forecast.len());

    println!("One-step accuracy on the historical data:");
    let metrics = forecaster.evaluate(&history)?;
    println!("{}", metrics);

    println!("Forecast as JSON (first 120 chars):");
    let json = forecast.to_json()?;
    println!("  {}...", &json[..json.len().min(120)]);

    Ok(())
}

fn create_sample_history(days: usize) -> Result<PriceSeries, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 0.15)?;

    let mut price = 14.0;
    let mut prices = Vec::with_capacity(days);
    for i in 0..days {
        price += 0.02 + noise.sample(&mut rng);
        // Seasonal wobble on top of the drift.
        prices.push(price + (i as f64 / 14.0).sin() * 0.4);
    }

    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    Ok(PriceSeries::from_prices(start, &prices)?)
}
