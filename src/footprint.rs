//! Carbon footprint accounting
//!
//! Deterministic emission-factor arithmetic: activity quantities times fixed
//! per-unit kg CO2e coefficients, summed across the energy, transportation,
//! food, goods and home categories.

use serde::{Deserialize, Serialize};

/// Per-unit emission factors in kg CO2e
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    // Energy, per kWh
    pub electricity: f64,
    pub natural_gas: f64,
    pub heating_oil: f64,

    // Transportation, per km
    pub car_petrol: f64,
    pub car_diesel: f64,
    pub car_electric: f64,
    pub bus: f64,
    pub train: f64,
    pub flight_short: f64,
    pub flight_medium: f64,
    pub flight_long: f64,

    // Food, per kg
    pub beef: f64,
    pub lamb: f64,
    pub pork: f64,
    pub chicken: f64,
    pub fish: f64,
    pub dairy: f64,
    pub vegetables: f64,
    pub fruits: f64,
    pub grains: f64,

    // Goods, per item or kg
    pub clothing: f64,
    pub electronics: f64,
    pub paper: f64,
    pub plastic: f64,

    // Home
    pub water: f64,
    pub waste: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            electricity: 0.233,
            natural_gas: 0.185,
            heating_oil: 0.249,
            car_petrol: 0.192,
            car_diesel: 0.171,
            car_electric: 0.053,
            bus: 0.103,
            train: 0.041,
            flight_short: 0.255,
            flight_medium: 0.156,
            flight_long: 0.150,
            beef: 27.0,
            lamb: 39.2,
            pork: 12.1,
            chicken: 6.9,
            fish: 6.1,
            dairy: 1.9,
            vegetables: 0.4,
            fruits: 0.5,
            grains: 0.6,
            clothing: 15.0,
            electronics: 125.0,
            paper: 0.8,
            plastic: 6.0,
            water: 0.344,
            waste: 0.5,
        }
    }
}

/// Activity quantities for a footprint calculation; unused fields stay zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityProfile {
    pub electricity_kwh: f64,
    pub natural_gas_kwh: f64,
    pub heating_oil_kwh: f64,

    pub car_petrol_km: f64,
    pub car_diesel_km: f64,
    pub car_electric_km: f64,
    pub bus_km: f64,
    pub train_km: f64,
    pub flight_short_km: f64,
    pub flight_medium_km: f64,
    pub flight_long_km: f64,

    pub beef_kg: f64,
    pub lamb_kg: f64,
    pub pork_kg: f64,
    pub chicken_kg: f64,
    pub fish_kg: f64,
    pub dairy_kg: f64,
    pub vegetables_kg: f64,
    pub fruits_kg: f64,
    pub grains_kg: f64,

    pub clothing_items: f64,
    pub electronics_items: f64,
    pub paper_kg: f64,
    pub plastic_kg: f64,

    pub water_m3: f64,
    pub waste_kg: f64,
}

/// Emissions from energy consumption, kg CO2e
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyEmissions {
    pub electricity: f64,
    pub natural_gas: f64,
    pub heating_oil: f64,
    pub total: f64,
}

/// Emissions from transportation, kg CO2e
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportEmissions {
    pub car_petrol: f64,
    pub car_diesel: f64,
    pub car_electric: f64,
    pub bus: f64,
    pub train: f64,
    pub flight_short: f64,
    pub flight_medium: f64,
    pub flight_long: f64,
    pub total: f64,
}

/// Emissions from food consumption, kg CO2e
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEmissions {
    pub beef: f64,
    pub lamb: f64,
    pub pork: f64,
    pub chicken: f64,
    pub fish: f64,
    pub dairy: f64,
    pub vegetables: f64,
    pub fruits: f64,
    pub grains: f64,
    pub total: f64,
}

/// Emissions from goods and services, kg CO2e
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsEmissions {
    pub clothing: f64,
    pub electronics: f64,
    pub paper: f64,
    pub plastic: f64,
    pub total: f64,
}

/// Emissions from home activities, kg CO2e
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeEmissions {
    pub water: f64,
    pub waste: f64,
    pub total: f64,
}

/// Full footprint breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintReport {
    /// Total emissions in kg CO2e
    pub total_kg: f64,
    /// Total emissions in tonnes CO2e
    pub total_tons: f64,
    pub energy: EnergyEmissions,
    pub transportation: TransportEmissions,
    pub food: FoodEmissions,
    pub goods: GoodsEmissions,
    pub home: HomeEmissions,
}

/// Offset purchase guidance derived from a total footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetRecommendation {
    /// Tonnes of CO2e to offset
    pub offset_tons: f64,
    /// Cost of offsetting with VCU credits, USD
    pub vcu_cost: f64,
    /// Cost of offsetting with CST credits, USD
    pub cst_cost: f64,
    /// Equivalent number of trees planted
    pub trees_planted: f64,
    /// Equivalent renewable energy generation, kWh
    pub renewable_energy_kwh: f64,
    /// General reduction tips
    pub reduction_tips: Vec<String>,
}

/// Average credit price used for VCU offset costing, USD per tonne
const VCU_PRICE_PER_TON: f64 = 15.0;
/// Average credit price used for CST offset costing, USD per tonne
const CST_PRICE_PER_TON: f64 = 20.0;
/// Approximate trees needed to absorb one tonne of CO2e
const TREES_PER_TON: f64 = 50.0;
/// Approximate renewable kWh displacing one tonne of CO2e
const RENEWABLE_KWH_PER_TON: f64 = 2500.0;

/// Carbon footprint calculator over a fixed emission-factor table
#[derive(Debug, Clone, Default)]
pub struct FootprintCalculator {
    factors: EmissionFactors,
}

impl FootprintCalculator {
    /// Calculator with the default emission factors
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator with a custom emission-factor table
    pub fn with_factors(factors: EmissionFactors) -> Self {
        Self { factors }
    }

    /// Get the emission-factor table
    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    /// Emissions from energy consumption
    pub fn energy_emissions(&self, profile: &ActivityProfile) -> EnergyEmissions {
        let electricity = profile.electricity_kwh * self.factors.electricity;
        let natural_gas = profile.natural_gas_kwh * self.factors.natural_gas;
        let heating_oil = profile.heating_oil_kwh * self.factors.heating_oil;

        EnergyEmissions {
            electricity,
            natural_gas,
            heating_oil,
            total: electricity + natural_gas + heating_oil,
        }
    }

    /// Emissions from transportation
    pub fn transport_emissions(&self, profile: &ActivityProfile) -> TransportEmissions {
        let car_petrol = profile.car_petrol_km * self.factors.car_petrol;
        let car_diesel = profile.car_diesel_km * self.factors.car_diesel;
        let car_electric = profile.car_electric_km * self.factors.car_electric;
        let bus = profile.bus_km * self.factors.bus;
        let train = profile.train_km * self.factors.train;
        let flight_short = profile.flight_short_km * self.factors.flight_short;
        let flight_medium = profile.flight_medium_km * self.factors.flight_medium;
        let flight_long = profile.flight_long_km * self.factors.flight_long;

        TransportEmissions {
            car_petrol,
            car_diesel,
            car_electric,
            bus,
            train,
            flight_short,
            flight_medium,
            flight_long,
            total: car_petrol
                + car_diesel
                + car_electric
                + bus
                + train
                + flight_short
                + flight_medium
                + flight_long,
        }
    }

    /// Emissions from food consumption
    pub fn food_emissions(&self, profile: &ActivityProfile) -> FoodEmissions {
        let beef = profile.beef_kg * self.factors.beef;
        let lamb = profile.lamb_kg * self.factors.lamb;
        let pork = profile.pork_kg * self.factors.pork;
        let chicken = profile.chicken_kg * self.factors.chicken;
        let fish = profile.fish_kg * self.factors.fish;
        let dairy = profile.dairy_kg * self.factors.dairy;
        let vegetables = profile.vegetables_kg * self.factors.vegetables;
        let fruits = profile.fruits_kg * self.factors.fruits;
        let grains = profile.grains_kg * self.factors.grains;

        FoodEmissions {
            beef,
            lamb,
            pork,
            chicken,
            fish,
            dairy,
            vegetables,
            fruits,
            grains,
            total: beef + lamb + pork + chicken + fish + dairy + vegetables + fruits + grains,
        }
    }

    /// Emissions from goods and services
    pub fn goods_emissions(&self, profile: &ActivityProfile) -> GoodsEmissions {
        let clothing = profile.clothing_items * self.factors.clothing;
        let electronics = profile.electronics_items * self.factors.electronics;
        let paper = profile.paper_kg * self.factors.paper;
        let plastic = profile.plastic_kg * self.factors.plastic;

        GoodsEmissions {
            clothing,
            electronics,
            paper,
            plastic,
            total: clothing + electronics + paper + plastic,
        }
    }

    /// Emissions from home activities
    pub fn home_emissions(&self, profile: &ActivityProfile) -> HomeEmissions {
        let water = profile.water_m3 * self.factors.water;
        let waste = profile.waste_kg * self.factors.waste;

        HomeEmissions {
            water,
            waste,
            total: water + waste,
        }
    }

    /// Full footprint across all activity categories
    pub fn total_footprint(&self, profile: &ActivityProfile) -> FootprintReport {
        let energy = self.energy_emissions(profile);
        let transportation = self.transport_emissions(profile);
        let food = self.food_emissions(profile);
        let goods = self.goods_emissions(profile);
        let home = self.home_emissions(profile);

        let total_kg =
            energy.total + transportation.total + food.total + goods.total + home.total;

        FootprintReport {
            total_kg,
            total_tons: total_kg / 1000.0,
            energy,
            transportation,
            food,
            goods,
            home,
        }
    }

    /// Offset purchase guidance for a footprint in tonnes CO2e
    pub fn offset_recommendations(&self, total_tons: f64) -> OffsetRecommendation {
        OffsetRecommendation {
            offset_tons: total_tons,
            vcu_cost: total_tons * VCU_PRICE_PER_TON,
            cst_cost: total_tons * CST_PRICE_PER_TON,
            trees_planted: total_tons * TREES_PER_TON,
            renewable_energy_kwh: total_tons * RENEWABLE_KWH_PER_TON,
            reduction_tips: vec![
                "Reduce meat consumption, especially beef and lamb".to_string(),
                "Use public transportation or carpool when possible".to_string(),
                "Switch to renewable energy sources for your home".to_string(),
                "Reduce air travel or offset your flights".to_string(),
                "Buy fewer new products and choose items with less packaging".to_string(),
                "Improve home energy efficiency with better insulation".to_string(),
                "Reduce water usage with efficient appliances and shorter showers".to_string(),
            ],
        }
    }
}
