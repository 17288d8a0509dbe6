use clap::Args;
use flood_risk::config::AppConfig;
use flood_risk::error::AppError;
use flood_risk::risk::{RiskLevel, Scenario};
use flood_risk::{AreaAssessment, AssessmentRequest, CityAssessment, FloodRiskService};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct SimulateArgs {
    /// City to assess (defaults to the configured default city)
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Rainfall intensity relative to a normal event
    #[arg(long, default_value_t = 1.0)]
    pub(crate) rainfall: f64,
    /// Drainage stress factor
    #[arg(long, default_value_t = 1.0)]
    pub(crate) drainage: f64,
    /// Assess a night-time event
    #[arg(long)]
    pub(crate) night: bool,
    /// Grid dimension (areas per side)
    #[arg(long)]
    pub(crate) grid_size: Option<usize>,
    /// Seed for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of highest-risk areas to list
    #[arg(long, default_value_t = 10)]
    pub(crate) top: usize,
    /// Event duration recorded on impact estimates
    #[arg(long)]
    pub(crate) duration_hours: Option<u32>,
    /// Write every scored area to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

/// Flat row written by the CSV export.
#[derive(Debug, Serialize)]
struct AreaRow<'a> {
    id: &'a str,
    name: &'a str,
    lat: f64,
    lng: f64,
    land_use: &'static str,
    elevation: f64,
    population_density: u32,
    drainage_quality: f64,
    final_score: f64,
    risk_level: &'static str,
    affected_population: Option<u64>,
    economic_impact_millions: Option<f64>,
    estimated_response_time: Option<f64>,
}

impl<'a> From<&'a AreaAssessment> for AreaRow<'a> {
    fn from(entry: &'a AreaAssessment) -> Self {
        let impact = entry.impact.as_ref();
        Self {
            id: &entry.area.id,
            name: &entry.area.name,
            lat: entry.area.center.lat,
            lng: entry.area.center.lng,
            land_use: entry.area.land_use.label(),
            elevation: entry.area.elevation,
            population_density: entry.area.population_density,
            drainage_quality: entry.area.drainage_quality,
            final_score: entry.risk_assessment.final_score,
            risk_level: entry.risk_assessment.risk_level.label(),
            affected_population: impact.map(|impact| impact.affected_population),
            economic_impact_millions: impact.map(|impact| impact.economic_impact_millions),
            estimated_response_time: impact.map(|impact| impact.estimated_response_time),
        }
    }
}

pub(crate) fn run_simulation_report(args: SimulateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = FloodRiskService::new(&config.simulation);
    let assessment = simulate(&service, &args)?;

    render_assessment(&assessment, args.top);

    if let Some(path) = args.csv.as_deref() {
        write_csv(path, &assessment)?;
        println!("\nWrote {} areas to {}", assessment.areas.len(), path.display());
    }
    Ok(())
}

pub(crate) fn simulate(
    service: &FloodRiskService,
    args: &SimulateArgs,
) -> Result<CityAssessment, AppError> {
    let request = AssessmentRequest {
        city: args.city.clone(),
        scenario: Scenario::new(args.rainfall, args.drainage, args.night)?,
        grid_size: args.grid_size,
        include_impact: true,
        include_weather: false,
        duration_hours: args.duration_hours,
    };

    let assessment = match args.seed {
        Some(seed) => service.assess(&request, &mut StdRng::seed_from_u64(seed))?,
        None => service.assess(&request, &mut rand::thread_rng())?,
    };
    Ok(assessment)
}

/// Areas ordered from highest to lowest score.
pub(crate) fn ranked_areas(assessment: &CityAssessment) -> Vec<&AreaAssessment> {
    let mut ranked: Vec<&AreaAssessment> = assessment.areas.iter().collect();
    ranked.sort_by(|a, b| {
        b.risk_assessment
            .final_score
            .total_cmp(&a.risk_assessment.final_score)
    });
    ranked
}

pub(crate) fn render_assessment(assessment: &CityAssessment, top: usize) {
    let scenario = &assessment.scenario;
    let stats = &assessment.statistics;

    println!("Flood risk simulation: {}", assessment.city);
    if !assessment.known_city {
        println!(
            "City not in catalog; using default anchor ({:.4}, {:.4})",
            assessment.coordinate.lat, assessment.coordinate.lng
        );
    }
    println!(
        "Scenario: rainfall x{:.2}, drainage x{:.2}, {}",
        scenario.rainfall_intensity(),
        scenario.drainage_factor(),
        if scenario.is_night() { "night" } else { "day" }
    );

    println!("\nStatistics");
    println!("- Areas: {}", stats.total_areas);
    for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
        let count = match level {
            RiskLevel::High => stats.high_risk,
            RiskLevel::Medium => stats.medium_risk,
            RiskLevel::Low => stats.low_risk,
        };
        println!(
            "- {} risk: {} ({:.0}%)",
            level.label(),
            count,
            stats.share(level) * 100.0
        );
    }
    println!(
        "- Average score {:.3} | Max score {:.3}",
        stats.avg_risk_score, stats.max_risk_score
    );
    if let Some(total) = stats.total_affected_population {
        println!("- Affected population: {}", total);
    }
    println!("- Hospitals: {}", assessment.hospitals.len());

    let ranked = ranked_areas(assessment);
    println!("\nTop {} areas", top.min(ranked.len()));
    for entry in ranked.into_iter().take(top) {
        let area = &entry.area;
        let score = &entry.risk_assessment;
        println!(
            "- {} [{}] score {:.3} ({}), {}",
            area.name,
            area.id,
            score.final_score,
            score.risk_level.label(),
            area.land_use.label()
        );
        let components = &score.components;
        println!(
            "    elevation {:.2} population {:.2} vulnerable {:.2} hospital {:.2} history {:.2} drainage {:.2}",
            components.elevation,
            components.population,
            components.vulnerable,
            components.hospital,
            components.history,
            components.drainage
        );
        if let Some(impact) = &entry.impact {
            println!(
                "    {} people affected, ${:.2}M, response {:.1} min, {:?} evacuation priority",
                impact.affected_population,
                impact.economic_impact_millions,
                impact.estimated_response_time,
                impact.evacuation_priority
            );
        }
    }
}

pub(crate) fn write_csv(path: &Path, assessment: &CityAssessment) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(io::Error::from)?;
    for entry in &assessment.areas {
        writer
            .serialize(AreaRow::from(entry))
            .map_err(io::Error::from)?;
    }
    writer.flush()?;
    Ok(())
}
