use assert_approx_eq::assert_approx_eq;
use carbon_ai::footprint::{ActivityProfile, EmissionFactors, FootprintCalculator};
use rstest::rstest;

#[test]
fn electricity_emissions_use_the_published_factor() {
    let calculator = FootprintCalculator::new();
    let profile = ActivityProfile {
        electricity_kwh: 100.0,
        ..Default::default()
    };

    let energy = calculator.energy_emissions(&profile);
    assert_approx_eq!(energy.electricity, 23.3);
    assert_approx_eq!(energy.total, 23.3);
}

#[rstest]
#[case(100.0, 0.0, 0.0, 23.3)]
#[case(0.0, 100.0, 0.0, 18.5)]
#[case(0.0, 0.0, 100.0, 24.9)]
#[case(100.0, 100.0, 100.0, 66.7)]
fn energy_totals_per_source(
    #[case] electricity_kwh: f64,
    #[case] natural_gas_kwh: f64,
    #[case] heating_oil_kwh: f64,
    #[case] expected_total: f64,
) {
    let calculator = FootprintCalculator::new();
    let profile = ActivityProfile {
        electricity_kwh,
        natural_gas_kwh,
        heating_oil_kwh,
        ..Default::default()
    };

    assert_approx_eq!(calculator.energy_emissions(&profile).total, expected_total);
}

#[test]
fn food_emissions_dominated_by_red_meat() {
    let calculator = FootprintCalculator::new();
    let profile = ActivityProfile {
        beef_kg: 2.0,
        vegetables_kg: 10.0,
        ..Default::default()
    };

    let food = calculator.food_emissions(&profile);
    assert_approx_eq!(food.beef, 54.0);
    assert_approx_eq!(food.vegetables, 4.0);
    assert_approx_eq!(food.total, 58.0);
}

#[test]
fn total_footprint_sums_all_categories() {
    let calculator = FootprintCalculator::new();
    let profile = ActivityProfile {
        electricity_kwh: 1000.0,
        car_petrol_km: 500.0,
        beef_kg: 5.0,
        clothing_items: 2.0,
        water_m3: 10.0,
        ..Default::default()
    };

    let report = calculator.total_footprint(&profile);
    let expected = report.energy.total
        + report.transportation.total
        + report.food.total
        + report.goods.total
        + report.home.total;

    assert_approx_eq!(report.total_kg, expected);
    assert_approx_eq!(report.total_tons, expected / 1000.0);
    assert_approx_eq!(report.energy.total, 233.0);
    assert_approx_eq!(report.transportation.total, 96.0);
    assert_approx_eq!(report.food.total, 135.0);
    assert_approx_eq!(report.goods.total, 30.0);
    assert_approx_eq!(report.home.total, 3.44);
}

#[test]
fn offset_recommendations_scale_with_tonnage() {
    let calculator = FootprintCalculator::new();
    let offsets = calculator.offset_recommendations(2.0);

    assert_approx_eq!(offsets.offset_tons, 2.0);
    assert_approx_eq!(offsets.vcu_cost, 30.0);
    assert_approx_eq!(offsets.cst_cost, 40.0);
    assert_approx_eq!(offsets.trees_planted, 100.0);
    assert_approx_eq!(offsets.renewable_energy_kwh, 5000.0);
    assert!(!offsets.reduction_tips.is_empty());
}

#[test]
fn custom_factors_override_defaults() {
    let factors = EmissionFactors {
        electricity: 0.5,
        ..Default::default()
    };
    let calculator = FootprintCalculator::with_factors(factors);
    let profile = ActivityProfile {
        electricity_kwh: 10.0,
        ..Default::default()
    };

    assert_approx_eq!(calculator.energy_emissions(&profile).electricity, 5.0);
}

#[test]
fn report_serializes_to_json() {
    let calculator = FootprintCalculator::new();
    let report = calculator.total_footprint(&ActivityProfile::default());
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("total_tons"));
}
