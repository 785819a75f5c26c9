//! Carbon reduction project analysis
//!
//! Featurizes tabular project descriptions and applies a classifier/regressor
//! pair to estimate success probability and expected carbon reduction, then
//! adjusts the reduction estimate by a weighted risk score.

use crate::error::{CarbonError, Result};
use crate::features::StandardScaler;
use crate::metrics::train_test_split;
use crate::models::{ClassifierModel, LogisticModel, RandomForest, RegressionModel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Project risk factors and their scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    /// Risk of reversal of carbon benefits
    Permanence,
    /// Risk of emissions moving elsewhere
    Leakage,
    /// Whether the project would have happened anyway
    Additionality,
    /// Accuracy of measurement methods
    Measurement,
    /// Potential negative social consequences
    SocialImpact,
}

impl RiskFactor {
    /// All risk factors in scoring order
    pub const ALL: [RiskFactor; 5] = [
        RiskFactor::Permanence,
        RiskFactor::Leakage,
        RiskFactor::Additionality,
        RiskFactor::Measurement,
        RiskFactor::SocialImpact,
    ];

    /// Scoring weight of this factor
    pub fn weight(&self) -> f64 {
        match self {
            RiskFactor::Permanence => 0.25,
            RiskFactor::Leakage => 0.20,
            RiskFactor::Additionality => 0.25,
            RiskFactor::Measurement => 0.15,
            RiskFactor::SocialImpact => 0.15,
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            RiskFactor::Permanence => "permanence",
            RiskFactor::Leakage => "leakage",
            RiskFactor::Additionality => "additionality",
            RiskFactor::Measurement => "measurement",
            RiskFactor::SocialImpact => "social_impact",
        }
    }
}

/// Broad project categories and their recognized project types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectCategory {
    RenewableEnergy,
    EnergyEfficiency,
    Forestry,
    Agriculture,
    WasteManagement,
    Transportation,
    Industrial,
}

impl ProjectCategory {
    /// All categories in featurization order
    pub const ALL: [ProjectCategory; 7] = [
        ProjectCategory::RenewableEnergy,
        ProjectCategory::EnergyEfficiency,
        ProjectCategory::Forestry,
        ProjectCategory::Agriculture,
        ProjectCategory::WasteManagement,
        ProjectCategory::Transportation,
        ProjectCategory::Industrial,
    ];

    /// Project types belonging to this category
    pub fn project_types(&self) -> &'static [&'static str] {
        match self {
            ProjectCategory::RenewableEnergy => {
                &["solar", "wind", "hydro", "geothermal", "biomass"]
            }
            ProjectCategory::EnergyEfficiency => &["industrial", "buildings", "transportation"],
            ProjectCategory::Forestry => {
                &["afforestation", "reforestation", "avoided_deforestation"]
            }
            ProjectCategory::Agriculture => {
                &["soil_carbon", "methane_reduction", "fertilizer_management"]
            }
            ProjectCategory::WasteManagement => {
                &["landfill_gas", "waste_to_energy", "composting"]
            }
            ProjectCategory::Transportation => {
                &["electric_vehicles", "public_transit", "fuel_efficiency"]
            }
            ProjectCategory::Industrial => {
                &["process_improvements", "fuel_switching", "carbon_capture"]
            }
        }
    }

    /// Find the category of a project type
    pub fn of(project_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.project_types().contains(&project_type))
    }
}

/// A tabular description of a carbon reduction project
///
/// Missing numeric fields featurize as 0.0; missing risk factors score as
/// medium risk (0.5).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub project_type: Option<String>,
    pub region: Option<String>,
    pub verification_standard: Option<String>,

    pub size_hectares: Option<f64>,
    pub duration_years: Option<f64>,
    pub cost_per_ton: Option<f64>,
    pub total_investment: Option<f64>,
    pub expected_roi: Option<f64>,
    pub annual_reduction_tons: Option<f64>,
    pub total_reduction_tons: Option<f64>,
    pub biodiversity_score: Option<f64>,
    pub community_benefit_score: Option<f64>,
    pub jobs_created: Option<f64>,

    pub permanence: Option<f64>,
    pub leakage: Option<f64>,
    pub additionality: Option<f64>,
    pub measurement: Option<f64>,
    pub social_impact: Option<f64>,
}

impl ProjectRecord {
    /// Value of a risk factor, if recorded
    pub fn risk_value(&self, factor: RiskFactor) -> Option<f64> {
        match factor {
            RiskFactor::Permanence => self.permanence,
            RiskFactor::Leakage => self.leakage,
            RiskFactor::Additionality => self.additionality,
            RiskFactor::Measurement => self.measurement,
            RiskFactor::SocialImpact => self.social_impact,
        }
    }

    fn numeric_features(&self) -> [f64; 15] {
        [
            self.size_hectares.unwrap_or(0.0),
            self.duration_years.unwrap_or(0.0),
            self.cost_per_ton.unwrap_or(0.0),
            self.total_investment.unwrap_or(0.0),
            self.expected_roi.unwrap_or(0.0),
            self.annual_reduction_tons.unwrap_or(0.0),
            self.total_reduction_tons.unwrap_or(0.0),
            self.biodiversity_score.unwrap_or(0.0),
            self.community_benefit_score.unwrap_or(0.0),
            self.jobs_created.unwrap_or(0.0),
            self.permanence.unwrap_or(0.0),
            self.leakage.unwrap_or(0.0),
            self.additionality.unwrap_or(0.0),
            self.measurement.unwrap_or(0.0),
            self.social_impact.unwrap_or(0.0),
        ]
    }
}

/// A training example: a project description with its observed outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectOutcome {
    pub record: ProjectRecord,
    /// Whether the project delivered its credited reductions
    pub success: bool,
    /// Verified reduction tonnage
    pub actual_reduction_tons: f64,
}

/// Fixed-width featurization for project records
///
/// The numeric block and the project-type one-hot block are static; region
/// and verification-standard vocabularies are learned from the training set,
/// so the feature width is fixed per analyzer instance. Values outside the
/// learned vocabularies one-hot to all zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFeaturizer {
    regions: Vec<String>,
    standards: Vec<String>,
}

impl ProjectFeaturizer {
    /// Learn region and standard vocabularies from training records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ProjectRecord>) -> Self {
        let mut regions = BTreeSet::new();
        let mut standards = BTreeSet::new();
        for record in records {
            if let Some(region) = &record.region {
                regions.insert(region.clone());
            }
            if let Some(standard) = &record.verification_standard {
                standards.insert(standard.clone());
            }
        }

        Self {
            regions: regions.into_iter().collect(),
            standards: standards.into_iter().collect(),
        }
    }

    /// Featurizer with empty vocabularies (numeric and type features only)
    pub fn minimal() -> Self {
        Self {
            regions: Vec::new(),
            standards: Vec::new(),
        }
    }

    /// Number of feature columns produced
    pub fn width(&self) -> usize {
        let type_slots: usize = ProjectCategory::ALL
            .iter()
            .map(|c| c.project_types().len())
            .sum();
        15 + type_slots + self.regions.len() + self.standards.len()
    }

    /// Build the feature row for a record
    pub fn features(&self, record: &ProjectRecord) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.width());
        row.extend_from_slice(&record.numeric_features());

        let project_type = record.project_type.as_deref();
        for category in ProjectCategory::ALL {
            for candidate in category.project_types() {
                row.push(if project_type == Some(candidate) { 1.0 } else { 0.0 });
            }
        }

        let region = record.region.as_deref();
        for candidate in &self.regions {
            row.push(if region == Some(candidate.as_str()) { 1.0 } else { 0.0 });
        }

        let standard = record.verification_standard.as_deref();
        for candidate in &self.standards {
            row.push(if standard == Some(candidate.as_str()) { 1.0 } else { 0.0 });
        }

        row
    }
}

/// Analysis results for one project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAssessment {
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub project_type: Option<String>,
    /// Probability the project delivers its credited reductions
    pub success_probability: f64,
    /// Model estimate of reduction tonnage
    pub expected_reduction_tons: f64,
    /// Reduction tonnage discounted by the risk score
    pub adjusted_reduction_tons: f64,
    /// Weighted risk score in [0, 1]
    pub risk_score: f64,
    /// Per-factor weighted risk contributions, in `RiskFactor::ALL` order
    pub risk_breakdown: Vec<(String, f64)>,
    /// 1 / cost_per_ton, when the cost is known
    pub cost_effectiveness: Option<f64>,
}

/// Training performance summary for the classifier/regressor pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub classification_accuracy: f64,
    pub regression_mse: f64,
    pub regression_mae: f64,
}

/// Improvement guidance for a project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImprovementPlan {
    pub assessment: ProjectAssessment,
    /// The two largest weighted risk contributions
    pub top_risk_factors: Vec<(String, f64)>,
    pub recommendations: Vec<String>,
}

/// Cost-per-ton threshold above which cost reduction advice is emitted
const HIGH_COST_PER_TON: f64 = 15.0;

/// Analyzer pairing a success classifier with a reduction regressor
#[derive(Debug)]
pub struct ProjectAnalyzer {
    classifier: Option<Box<dyn ClassifierModel>>,
    regressor: Option<Box<dyn RegressionModel>>,
    featurizer: Option<ProjectFeaturizer>,
    scaler: Option<StandardScaler>,
}

impl Default for ProjectAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectAnalyzer {
    /// Create an untrained analyzer
    pub fn new() -> Self {
        Self {
            classifier: None,
            regressor: None,
            featurizer: None,
            scaler: None,
        }
    }

    /// Create an analyzer from already-trained models (for testing with stubs)
    pub fn with_models(
        classifier: Box<dyn ClassifierModel>,
        regressor: Box<dyn RegressionModel>,
        featurizer: ProjectFeaturizer,
        scaler: StandardScaler,
    ) -> Self {
        Self {
            classifier: Some(classifier),
            regressor: Some(regressor),
            featurizer: Some(featurizer),
            scaler: Some(scaler),
        }
    }

    /// Check whether the analyzer has trained models
    pub fn is_trained(&self) -> bool {
        self.classifier.is_some() && self.regressor.is_some()
    }

    /// Train the classifier/regressor pair on observed project outcomes
    ///
    /// Uses a 20% trailing holdout for the reported metrics; the vocabulary
    /// and the scaler are fitted on the full training set and reused
    /// read-only for every later analysis.
    pub fn train(&mut self, outcomes: &[ProjectOutcome]) -> Result<TrainingReport> {
        if outcomes.len() < 5 {
            return Err(CarbonError::InvalidInput(format!(
                "Training requires at least 5 outcomes, got {}",
                outcomes.len()
            )));
        }

        let featurizer = ProjectFeaturizer::from_records(outcomes.iter().map(|o| &o.record));
        let rows: Vec<Vec<f64>> = outcomes
            .iter()
            .map(|o| featurizer.features(&o.record))
            .collect();

        let scaler = StandardScaler::fit_rows(&rows)?;
        let scaled: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| scaler.transform_row(row))
            .collect::<Result<_>>()?;

        let successes: Vec<bool> = outcomes.iter().map(|o| o.success).collect();
        let reductions: Vec<f64> = outcomes.iter().map(|o| o.actual_reduction_tons).collect();

        let (train_x, test_x) = train_test_split(&scaled, 0.2);
        let (train_class, test_class) = train_test_split(&successes, 0.2);
        let (train_reg, test_reg) = train_test_split(&reductions, 0.2);

        let classifier = LogisticModel::new().fit(&train_x, &train_class)?;
        let regressor = RandomForest::default().fit(&train_x, &train_reg)?;

        let mut correct = 0usize;
        let mut squared_error = 0.0;
        let mut absolute_error = 0.0;
        for (i, row) in test_x.iter().enumerate() {
            let predicted_class = classifier.predict(row)? >= 0.5;
            if predicted_class == test_class[i] {
                correct += 1;
            }
            let predicted_reduction = regressor.predict(row)?;
            let error = predicted_reduction - test_reg[i];
            squared_error += error * error;
            absolute_error += error.abs();
        }

        let report = if test_x.is_empty() {
            TrainingReport {
                classification_accuracy: 0.0,
                regression_mse: 0.0,
                regression_mae: 0.0,
            }
        } else {
            let n = test_x.len() as f64;
            TrainingReport {
                classification_accuracy: correct as f64 / n,
                regression_mse: squared_error / n,
                regression_mae: absolute_error / n,
            }
        };

        log::info!(
            "Trained project models on {} outcomes (holdout accuracy {:.2})",
            outcomes.len(),
            report.classification_accuracy
        );

        self.classifier = Some(Box::new(classifier));
        self.regressor = Some(Box::new(regressor));
        self.featurizer = Some(featurizer);
        self.scaler = Some(scaler);

        Ok(report)
    }

    /// Analyze one project
    pub fn analyze(&self, record: &ProjectRecord) -> Result<ProjectAssessment> {
        let classifier = self.classifier.as_deref().ok_or_else(not_ready)?;
        let regressor = self.regressor.as_deref().ok_or_else(not_ready)?;
        let featurizer = self.featurizer.as_ref().ok_or_else(not_ready)?;
        let scaler = self.scaler.as_ref().ok_or_else(not_ready)?;

        let features = scaler.transform_row(&featurizer.features(record))?;

        let success_probability = classifier.predict_probability(&features)?;
        let expected_reduction_tons = regressor.predict(&features)?;

        let risk_breakdown: Vec<(String, f64)> = RiskFactor::ALL
            .into_iter()
            .map(|factor| {
                let value = record.risk_value(factor).unwrap_or(0.5);
                (factor.name().to_string(), value * factor.weight())
            })
            .collect();
        let risk_score: f64 = risk_breakdown.iter().map(|(_, v)| v).sum();

        // Higher risk discounts the reduction estimate.
        let risk_adjustment = 1.0 - risk_score / 2.0;
        let adjusted_reduction_tons = expected_reduction_tons * risk_adjustment;

        let cost_effectiveness = record
            .cost_per_ton
            .filter(|&c| c > 0.0)
            .map(|c| 1.0 / c);

        Ok(ProjectAssessment {
            project_id: record.project_id.clone(),
            project_name: record.project_name.clone(),
            project_type: record.project_type.clone(),
            success_probability,
            expected_reduction_tons,
            adjusted_reduction_tons,
            risk_score,
            risk_breakdown,
            cost_effectiveness,
        })
    }

    /// Analyze several projects, sorted by adjusted reduction, descending
    pub fn compare(&self, records: &[ProjectRecord]) -> Result<Vec<ProjectAssessment>> {
        let mut assessments = records
            .iter()
            .map(|record| self.analyze(record))
            .collect::<Result<Vec<_>>>()?;

        assessments.sort_by(|a, b| {
            b.adjusted_reduction_tons
                .partial_cmp(&a.adjusted_reduction_tons)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(assessments)
    }

    /// Build improvement guidance from the two largest risk contributions
    pub fn improvement_recommendations(&self, record: &ProjectRecord) -> Result<ImprovementPlan> {
        let assessment = self.analyze(record)?;

        let mut sorted_risks = assessment.risk_breakdown.clone();
        sorted_risks.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let top_risk_factors: Vec<(String, f64)> = sorted_risks.into_iter().take(2).collect();

        let mut recommendations = Vec::new();
        for (factor, _) in &top_risk_factors {
            match factor.as_str() {
                "permanence" => {
                    recommendations.push(
                        "Improve permanence by implementing longer-term monitoring and verification systems.".to_string(),
                    );
                    recommendations.push(
                        "Consider buffer pools or insurance mechanisms to address reversal risks.".to_string(),
                    );
                }
                "leakage" => {
                    recommendations.push(
                        "Expand project boundaries to capture potential leakage sources.".to_string(),
                    );
                    recommendations.push(
                        "Implement monitoring systems for activities outside the project area.".to_string(),
                    );
                }
                "additionality" => {
                    recommendations.push(
                        "Strengthen the additionality case with better financial analysis.".to_string(),
                    );
                    recommendations.push(
                        "Document barriers to implementation more thoroughly.".to_string(),
                    );
                }
                "measurement" => {
                    recommendations.push(
                        "Adopt more rigorous measurement methodologies with lower uncertainty.".to_string(),
                    );
                    recommendations.push(
                        "Increase sampling frequency and density for more accurate measurements.".to_string(),
                    );
                }
                "social_impact" => {
                    recommendations.push(
                        "Enhance community engagement and benefit-sharing mechanisms.".to_string(),
                    );
                    recommendations.push(
                        "Implement a grievance mechanism and regular stakeholder consultations.".to_string(),
                    );
                }
                _ => {}
            }
        }

        if let Some(cost) = record.cost_per_ton {
            if cost > HIGH_COST_PER_TON {
                recommendations.push(
                    "Explore ways to reduce implementation costs or increase efficiency.".to_string(),
                );
                recommendations.push(
                    "Consider scaling up the project to achieve economies of scale.".to_string(),
                );
            }
        }

        if let Some(project_type) = record.project_type.as_deref() {
            match ProjectCategory::of(project_type) {
                Some(ProjectCategory::RenewableEnergy) => {
                    recommendations.push(
                        "Consider hybrid systems to improve reliability and efficiency.".to_string(),
                    );
                }
                Some(ProjectCategory::Forestry) => {
                    recommendations.push(
                        "Diversify tree species to improve resilience to disease and climate change.".to_string(),
                    );
                    recommendations.push(
                        "Integrate agroforestry components to provide additional income streams.".to_string(),
                    );
                }
                Some(ProjectCategory::Agriculture) => {
                    recommendations.push(
                        "Implement precision agriculture techniques to optimize resource use.".to_string(),
                    );
                }
                Some(ProjectCategory::WasteManagement) => {
                    recommendations.push(
                        "Explore energy recovery options to improve project economics.".to_string(),
                    );
                }
                _ => {}
            }
        }

        Ok(ImprovementPlan {
            assessment,
            top_risk_factors,
            recommendations,
        })
    }
}

fn not_ready() -> CarbonError {
    CarbonError::ModelNotReady("Project analysis requested before training".to_string())
}
