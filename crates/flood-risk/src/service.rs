use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::risk::{
    ImpactEstimate, ImpactPredictor, RiskScoreResult, RiskScorer, RiskStatistics, Scenario,
    DEFAULT_EVENT_DURATION_HOURS,
};
use crate::simulation::{
    Area, CityCatalog, CityView, Coordinate, Facility, FacilityGenerator, GeoGridGenerator,
    ResolvedCity, SimulatedWeather, WeatherObservation, WeatherProvider,
};

/// Service composing the city catalog, generators, scorer, and impact predictor.
///
/// Holds no mutable state; share it behind an `Arc` and call it from any thread.
pub struct FloodRiskService {
    catalog: CityCatalog,
    grid: GeoGridGenerator,
    facilities: FacilityGenerator,
    scorer: RiskScorer,
    predictor: ImpactPredictor,
    weather: Arc<dyn WeatherProvider>,
    default_grid_size: usize,
    max_grid_size: usize,
}

/// Areas and facilities generated for one city.
#[derive(Debug, Clone, Serialize)]
pub struct CitySnapshot {
    pub city: ResolvedCity,
    pub areas: Vec<Area>,
    pub hospitals: Vec<Facility>,
}

/// Inputs for a full city assessment.
#[derive(Debug, Clone, Default)]
pub struct AssessmentRequest {
    /// Falls back to the catalog's default city when absent.
    pub city: Option<String>,
    pub scenario: Scenario,
    pub grid_size: Option<usize>,
    pub include_impact: bool,
    pub include_weather: bool,
    pub duration_hours: Option<u32>,
}

/// One scored district as exposed to the map view.
#[derive(Debug, Clone, Serialize)]
pub struct AreaAssessment {
    #[serde(flatten)]
    pub area: Area,
    pub risk_assessment: RiskScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactEstimate>,
}

/// Scored map-data document for one city and scenario.
#[derive(Debug, Clone, Serialize)]
pub struct CityAssessment {
    pub city: String,
    pub known_city: bool,
    pub coordinate: Coordinate,
    pub scenario: Scenario,
    pub areas: Vec<AreaAssessment>,
    pub hospitals: Vec<Facility>,
    pub statistics: RiskStatistics,
    pub timestamp: DateTime<Utc>,
    pub status: &'static str,
}

/// Weather reading for a resolved city.
#[derive(Debug, Clone, Serialize)]
pub struct CityWeather {
    pub city: ResolvedCity,
    pub observation: WeatherObservation,
}

impl FloodRiskService {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            catalog: config.city_catalog(),
            grid: GeoGridGenerator::new(),
            facilities: FacilityGenerator::new(config.facility_count),
            scorer: RiskScorer::new(),
            predictor: ImpactPredictor::new(),
            weather: Arc::new(SimulatedWeather),
            default_grid_size: config.grid_size,
            max_grid_size: config.max_grid_size,
        }
    }

    /// Replace the simulated weather source.
    pub fn with_weather_provider(mut self, provider: Arc<dyn WeatherProvider>) -> Self {
        self.weather = provider;
        self
    }

    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    pub fn cities(&self) -> Vec<CityView> {
        self.catalog.cities()
    }

    pub fn default_grid_size(&self) -> usize {
        self.default_grid_size
    }

    /// Generate a fresh area grid and facility set. Unknown cities fall back silently.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        city: &str,
        grid_size: Option<usize>,
        rng: &mut R,
    ) -> Result<CitySnapshot, AssessmentError> {
        let dimension = self.validate_grid_size(grid_size)?;
        let city = self.catalog.resolve(city);
        if !city.known {
            debug!(requested = %city.name, "unknown city, using default coordinate");
        }

        let areas = self.grid.generate(&city, dimension, rng);
        let hospitals = self.facilities.generate(&city, rng);

        Ok(CitySnapshot {
            city,
            areas,
            hospitals,
        })
    }

    pub fn score(&self, area: &Area, scenario: &Scenario) -> RiskScoreResult {
        self.scorer.score(area, scenario)
    }

    pub fn predict_impact<R: Rng + ?Sized>(
        &self,
        area: &Area,
        score: &RiskScoreResult,
        duration_hours: Option<u32>,
        rng: &mut R,
    ) -> ImpactEstimate {
        self.predictor.predict(
            area,
            score,
            duration_hours.unwrap_or(DEFAULT_EVENT_DURATION_HOURS),
            rng,
        )
    }

    /// Generate, score, and summarise a city under one scenario.
    pub fn assess<R: Rng + ?Sized>(
        &self,
        request: &AssessmentRequest,
        rng: &mut R,
    ) -> Result<CityAssessment, AssessmentError> {
        let requested_city = request
            .city
            .as_deref()
            .unwrap_or_else(|| self.catalog.default_city());
        let snapshot = self.generate(requested_city, request.grid_size, rng)?;

        let mut scenario = request.scenario.clone();
        if request.include_weather {
            scenario = scenario.with_weather(self.weather.observe(snapshot.city.coordinate));
        }

        let areas: Vec<AreaAssessment> = snapshot
            .areas
            .into_iter()
            .map(|area| {
                let risk_assessment = self.score(&area, &scenario);
                let impact = request.include_impact.then(|| {
                    self.predict_impact(&area, &risk_assessment, request.duration_hours, rng)
                });
                AreaAssessment {
                    area,
                    risk_assessment,
                    impact,
                }
            })
            .collect();

        let mut statistics =
            RiskStatistics::from_scores(areas.iter().map(|entry| &entry.risk_assessment));
        if request.include_impact {
            statistics = statistics.with_impacts(areas.iter().filter_map(|entry| entry.impact.as_ref()));
        }

        info!(
            city = %snapshot.city.name,
            known_city = snapshot.city.known,
            areas = statistics.total_areas,
            high_risk = statistics.high_risk,
            avg_risk = statistics.avg_risk_score,
            "city assessment complete"
        );

        Ok(CityAssessment {
            city: snapshot.city.name,
            known_city: snapshot.city.known,
            coordinate: snapshot.city.coordinate,
            scenario,
            areas,
            hospitals: snapshot.hospitals,
            statistics,
            timestamp: Utc::now(),
            status: "success",
        })
    }

    pub fn weather(&self, city: &str) -> CityWeather {
        let city = self.catalog.resolve(city);
        let observation = self.weather.observe(city.coordinate);
        CityWeather { city, observation }
    }

    fn validate_grid_size(&self, requested: Option<usize>) -> Result<usize, AssessmentError> {
        let size = requested.unwrap_or(self.default_grid_size);
        if size == 0 || size > self.max_grid_size {
            return Err(AssessmentError::GridSize {
                requested: size,
                max: self.max_grid_size,
            });
        }
        Ok(size)
    }
}

impl Default for FloodRiskService {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

/// Error raised when an assessment request cannot be served.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Scenario(#[from] crate::risk::ScenarioError),
    #[error("grid_size must be between 1 and {max} (received {requested})")]
    GridSize { requested: usize, max: usize },
}
