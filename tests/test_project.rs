use assert_approx_eq::assert_approx_eq;
use carbon_ai::error::{CarbonError, Result};
use carbon_ai::features::StandardScaler;
use carbon_ai::models::{ClassifierModel, RegressionModel};
use carbon_ai::project::{
    ProjectAnalyzer, ProjectCategory, ProjectFeaturizer, ProjectOutcome, ProjectRecord, RiskFactor,
};

#[derive(Debug)]
struct FixedClassifier(f64);

impl ClassifierModel for FixedClassifier {
    fn predict(&self, _features: &[f64]) -> Result<f64> {
        Ok(if self.0 >= 0.5 { 1.0 } else { 0.0 })
    }

    fn predict_probability(&self, _features: &[f64]) -> Result<f64> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "FixedClassifier"
    }
}

/// Regressor echoing the first feature (size_hectares with an identity scaler)
#[derive(Debug)]
struct EchoRegressor;

impl RegressionModel for EchoRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        Ok(features[0])
    }

    fn name(&self) -> &str {
        "EchoRegressor"
    }
}

fn stub_analyzer(probability: f64) -> ProjectAnalyzer {
    let featurizer = ProjectFeaturizer::minimal();
    let width = featurizer.width();
    ProjectAnalyzer::with_models(
        Box::new(FixedClassifier(probability)),
        Box::new(EchoRegressor),
        featurizer,
        StandardScaler::identity(width),
    )
}

fn forestry_record(size: f64) -> ProjectRecord {
    ProjectRecord {
        project_type: Some("reforestation".to_string()),
        size_hectares: Some(size),
        cost_per_ton: Some(20.0),
        ..Default::default()
    }
}

#[test]
fn risk_weights_sum_to_one() {
    let total: f64 = RiskFactor::ALL.iter().map(|f| f.weight()).sum();
    assert_approx_eq!(total, 1.0);
}

#[test]
fn project_types_map_back_to_their_category() {
    assert_eq!(
        ProjectCategory::of("reforestation"),
        Some(ProjectCategory::Forestry)
    );
    assert_eq!(
        ProjectCategory::of("solar"),
        Some(ProjectCategory::RenewableEnergy)
    );
    assert_eq!(ProjectCategory::of("unknown_type"), None);
}

#[test]
fn featurizer_width_is_fixed_per_instance() {
    let minimal = ProjectFeaturizer::minimal();
    assert_eq!(minimal.width(), 15 + 23);

    let records = vec![
        ProjectRecord {
            region: Some("latin_america".to_string()),
            verification_standard: Some("VCS".to_string()),
            ..Default::default()
        },
        ProjectRecord {
            region: Some("asia".to_string()),
            ..Default::default()
        },
    ];
    let learned = ProjectFeaturizer::from_records(&records);
    assert_eq!(learned.width(), 15 + 23 + 2 + 1);

    // Every record featurizes to the same width, known or not.
    let stranger = ProjectRecord {
        region: Some("europe".to_string()),
        project_type: Some("wind".to_string()),
        ..Default::default()
    };
    assert_eq!(learned.features(&stranger).len(), learned.width());
}

#[test]
fn missing_risk_factors_default_to_medium_risk() {
    let analyzer = stub_analyzer(0.8);
    let assessment = analyzer.analyze(&forestry_record(120.0)).unwrap();

    // All five factors default to 0.5 and the weights sum to 1.
    assert_approx_eq!(assessment.risk_score, 0.5);
    assert_approx_eq!(assessment.expected_reduction_tons, 120.0);
    assert_approx_eq!(assessment.adjusted_reduction_tons, 120.0 * 0.75);
    assert_approx_eq!(assessment.success_probability, 0.8);
    assert_approx_eq!(assessment.cost_effectiveness.unwrap(), 0.05);
}

#[test]
fn recorded_risk_factors_change_the_score() {
    let analyzer = stub_analyzer(0.5);
    let mut record = forestry_record(100.0);
    record.permanence = Some(1.0);
    record.leakage = Some(0.0);

    let assessment = analyzer.analyze(&record).unwrap();
    // 1.0*0.25 + 0.0*0.20 + 0.5*(0.25 + 0.15 + 0.15)
    assert_approx_eq!(assessment.risk_score, 0.25 + 0.275);
}

#[test]
fn untrained_analyzer_is_model_not_ready() {
    let analyzer = ProjectAnalyzer::new();
    match analyzer.analyze(&forestry_record(10.0)) {
        Err(CarbonError::ModelNotReady(_)) => {}
        other => panic!("Expected ModelNotReady, got {:?}", other),
    }
}

#[test]
fn compare_sorts_by_adjusted_reduction() {
    let analyzer = stub_analyzer(0.6);
    let records = vec![
        forestry_record(50.0),
        forestry_record(500.0),
        forestry_record(200.0),
    ];

    let ranked = analyzer.compare(&records).unwrap();
    assert_eq!(ranked.len(), 3);
    assert!(ranked[0].adjusted_reduction_tons >= ranked[1].adjusted_reduction_tons);
    assert!(ranked[1].adjusted_reduction_tons >= ranked[2].adjusted_reduction_tons);
    assert_approx_eq!(ranked[0].expected_reduction_tons, 500.0);
}

#[test]
fn recommendations_target_the_top_risk_factors() {
    let analyzer = stub_analyzer(0.6);
    let mut record = forestry_record(100.0);
    record.permanence = Some(0.9);
    record.additionality = Some(0.9);
    record.leakage = Some(0.1);
    record.measurement = Some(0.1);
    record.social_impact = Some(0.1);
    record.cost_per_ton = Some(25.0);

    let plan = analyzer.improvement_recommendations(&record).unwrap();
    assert_eq!(plan.top_risk_factors.len(), 2);
    let names: Vec<&str> = plan
        .top_risk_factors
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert!(names.contains(&"permanence"));
    assert!(names.contains(&"additionality"));
    // Cost advice and forestry-specific advice are both present.
    assert!(plan
        .recommendations
        .iter()
        .any(|r| r.contains("economies of scale")));
    assert!(plan
        .recommendations
        .iter()
        .any(|r| r.contains("tree species")));
}

#[test]
fn trains_on_synthetic_outcomes_and_analyzes() {
    let mut outcomes = Vec::new();
    for i in 0..30 {
        let size = 10.0 + i as f64 * 5.0;
        outcomes.push(ProjectOutcome {
            record: ProjectRecord {
                project_type: Some(if i % 2 == 0 { "solar" } else { "reforestation" }.to_string()),
                region: Some(if i % 3 == 0 { "asia" } else { "africa" }.to_string()),
                size_hectares: Some(size),
                duration_years: Some(10.0),
                cost_per_ton: Some(8.0 + (i % 5) as f64),
                annual_reduction_tons: Some(size * 2.0),
                permanence: Some(0.3),
                ..Default::default()
            },
            success: i % 2 == 0,
            actual_reduction_tons: size * 2.0 * 0.9,
        });
    }

    let mut analyzer = ProjectAnalyzer::new();
    let report = analyzer.train(&outcomes).unwrap();
    assert!(report.classification_accuracy >= 0.0 && report.classification_accuracy <= 1.0);
    assert!(report.regression_mse.is_finite());
    assert!(analyzer.is_trained());

    let assessment = analyzer.analyze(&outcomes[0].record).unwrap();
    assert!(assessment.success_probability >= 0.0 && assessment.success_probability <= 1.0);
    assert!(assessment.expected_reduction_tons.is_finite());
    assert!(assessment.adjusted_reduction_tons <= assessment.expected_reduction_tons);
}

#[test]
fn training_requires_enough_outcomes() {
    let mut analyzer = ProjectAnalyzer::new();
    let outcomes = vec![ProjectOutcome {
        record: ProjectRecord::default(),
        success: true,
        actual_reduction_tons: 10.0,
    }];
    match analyzer.train(&outcomes) {
        Err(CarbonError::InvalidInput(_)) => {}
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}
