use carbon_ai::footprint::{ActivityProfile, FootprintCalculator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Carbon AI: Footprint Report Example");
    println!("===================================\n");

    let profile = ActivityProfile {
        electricity_kwh: 3200.0,
        natural_gas_kwh: 8000.0,
        car_petrol_km: 9000.0,
        train_km: 1200.0,
        flight_short_km: 2000.0,
        beef_kg: 20.0,
        chicken_kg: 15.0,
        dairy_kg: 100.0,
        vegetables_kg: 80.0,
        clothing_items: 12.0,
        electronics_items: 1.0,
        water_m3: 50.0,
        waste_kg: 300.0,
        ..Default::default()
    };

    let calculator = FootprintCalculator::new();
    let report = calculator.total_footprint(&profile);

    println!("Annual footprint: {:.1} kg CO2e ({:.2} tonnes)\n", report.total_kg, report.total_tons);
    println!("By category:");
    println!("  Energy:         {:.1} kg", report.energy.total);
    println!("  Transportation: {:.1} kg", report.transportation.total);
    println!("  Food:           {:.1} kg", report.food.total);
    println!("  Goods:          {:.1} kg", report.goods.total);
    println!("  Home:           {:.1} kg\n", report.home.total);

    let offsets = calculator.offset_recommendations(report.total_tons);
    println!("Offsetting {:.2} tonnes:", offsets.offset_tons);
    println!("  VCU credits: {:.2} USD", offsets.vcu_cost);
    println!("  CST credits: {:.2} USD", offsets.cst_cost);
    println!(
        "  Equivalent to planting {:.0} trees or {:.0} kWh of renewables\n",
        offsets.trees_planted, offsets.renewable_energy_kwh
    );

    println!("Reduction tips:");
    for tip in &offsets.reduction_tips {
        println!("  - {}", tip);
    }

    println!("\nFull report as JSON:");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
