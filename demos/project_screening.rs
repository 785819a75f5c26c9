use carbon_ai::project::{ProjectAnalyzer, ProjectOutcome, ProjectRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Carbon AI: Project Screening Example");
    println!("====================================\n");

    println!("Training on historical project outcomes...");
    let outcomes = historical_outcomes();
    let mut analyzer = ProjectAnalyzer::new();
    let report = analyzer.train(&outcomes)?;
    println!(
        "Trained on {} projects (holdout accuracy {:.2}, regression MAE {:.1})\n",
        outcomes.len(),
        report.classification_accuracy,
        report.regression_mae
    );

    let candidates = vec![
        candidate("amazon-reforest", "reforestation", 800.0, 9.0, 0.3),
        candidate("sahel-solar", "solar", 120.0, 12.0, 0.2),
        candidate("delta-landfill", "landfill_gas", 60.0, 18.0, 0.6),
    ];

    println!("Ranking candidate projects:");
    for assessment in analyzer.compare(&candidates)? {
        println!(
            "  {} — success {:.0}%, adjusted reduction {:.0} t (risk {:.2})",
            assessment.project_id.as_deref().unwrap_or("unknown"),
            assessment.success_probability * 100.0,
            assessment.adjusted_reduction_tons,
            assessment.risk_score
        );
    }

    println!("\nImprovement plan for the riskiest candidate:");
    let plan = analyzer.improvement_recommendations(&candidates[2])?;
    for recommendation in &plan.recommendations {
        println!("  - {}", recommendation);
    }

    Ok(())
}

fn candidate(
    id: &str,
    project_type: &str,
    size: f64,
    cost_per_ton: f64,
    permanence: f64,
) -> ProjectRecord {
    ProjectRecord {
        project_id: Some(id.to_string()),
        project_type: Some(project_type.to_string()),
        region: Some("latin_america".to_string()),
        verification_standard: Some("VCS".to_string()),
        size_hectares: Some(size),
        duration_years: Some(15.0),
        cost_per_ton: Some(cost_per_ton),
        annual_reduction_tons: Some(size * 1.8),
        permanence: Some(permanence),
        ..Default::default()
    }
}

fn historical_outcomes() -> Vec<ProjectOutcome> {
    let types = ["solar", "wind", "reforestation", "landfill_gas"];
    let regions = ["latin_america", "asia", "africa"];

    (0..40)
        .map(|i| {
            let size = 50.0 + (i as f64) * 25.0;
            let permanence = 0.2 + (i % 5) as f64 * 0.15;
            ProjectOutcome {
                record: ProjectRecord {
                    project_id: Some(format!("hist-{:02}", i)),
                    project_type: Some(types[i % types.len()].to_string()),
                    region: Some(regions[i % regions.len()].to_string()),
                    verification_standard: Some("VCS".to_string()),
                    size_hectares: Some(size),
                    duration_years: Some(10.0 + (i % 10) as f64),
                    cost_per_ton: Some(6.0 + (i % 8) as f64 * 2.0),
                    annual_reduction_tons: Some(size * 1.8),
                    permanence: Some(permanence),
                    ..Default::default()
                },
                success: permanence < 0.6,
                actual_reduction_tons: size * 1.8 * if permanence < 0.6 { 0.95 } else { 0.4 },
            }
        })
        .collect()
}
