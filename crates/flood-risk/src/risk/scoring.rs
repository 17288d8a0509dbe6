use serde::{Deserialize, Serialize};

use super::scenario::Scenario;
use crate::simulation::Area;

/// Scores never reach 1.0 so that every result keeps some residual uncertainty.
pub const SCORE_CEILING: f64 = 0.95;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.33;
pub const HIGH_RISK_THRESHOLD: f64 = 0.66;

const ELEVATION_SATURATION_M: f64 = 50.0;
const POPULATION_SATURATION: f64 = 20_000.0;
const VULNERABLE_SATURATION: f64 = 60.0;
const HOSPITAL_DECAY_KM: f64 = 5.0;
const FLOOD_HISTORY_SATURATION: f64 = 5.0;
const RAINFALL_SENSITIVITY: f64 = 0.6;
const NIGHT_MULTIPLIER: f64 = 1.15;

/// Relative weight of each normalized component in the base risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub elevation: f64,
    pub population: f64,
    pub vulnerable: f64,
    pub hospital: f64,
    pub history: f64,
    pub drainage: f64,
}

/// Elevation and density dominate; the weights sum to 1.
pub const RISK_WEIGHTS: RiskWeights = RiskWeights {
    elevation: 0.28,
    population: 0.22,
    vulnerable: 0.18,
    hospital: 0.16,
    history: 0.10,
    drainage: 0.06,
};

impl RiskWeights {
    pub fn total(&self) -> f64 {
        self.elevation
            + self.population
            + self.vulnerable
            + self.hospital
            + self.history
            + self.drainage
    }
}

/// Area attributes mapped onto `[0, 1]`, where 1 is the riskiest value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskComponents {
    pub elevation: f64,
    pub population: f64,
    pub vulnerable: f64,
    pub hospital: f64,
    pub history: f64,
    pub drainage: f64,
}

impl RiskComponents {
    pub fn from_area(area: &Area) -> Self {
        let vulnerable_share = area.elderly_percentage * 1.2 + area.children_percentage * 0.8;
        Self {
            elevation: 1.0 - unit(area.elevation / ELEVATION_SATURATION_M),
            // Log scale compresses the heavy tail of dense districts.
            population: unit(
                f64::from(area.population_density).ln_1p() / POPULATION_SATURATION.ln_1p(),
            ),
            vulnerable: unit(vulnerable_share / VULNERABLE_SATURATION),
            // Saturates toward 1 for very distant hospitals.
            hospital: unit(1.0 - (-area.nearest_hospital_distance / HOSPITAL_DECAY_KM).exp()),
            history: unit(f64::from(area.historical_floods) / FLOOD_HISTORY_SATURATION),
            drainage: 1.0 - unit(area.drainage_quality),
        }
    }

    pub fn weighted(&self, weights: &RiskWeights) -> f64 {
        weights.elevation * self.elevation
            + weights.population * self.population
            + weights.vulnerable * self.vulnerable
            + weights.hospital * self.hospital
            + weights.history * self.history
            + weights.drainage * self.drainage
    }
}

/// Scenario-dependent scalars applied to the base risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMultipliers {
    pub rainfall: f64,
    pub drainage: f64,
    pub time: f64,
    pub infrastructure: f64,
    pub land_use: f64,
}

impl RiskMultipliers {
    pub fn for_scenario(area: &Area, scenario: &Scenario) -> Self {
        let drainage_deficit = 1.0 - unit(area.drainage_quality);
        Self {
            // 60% sensitivity: doubling rainfall does not double the risk.
            rainfall: 1.0 + (scenario.rainfall_intensity() - 1.0) * RAINFALL_SENSITIVITY,
            drainage: 1.0 + drainage_deficit * scenario.drainage_factor(),
            time: if scenario.is_night() {
                NIGHT_MULTIPLIER
            } else {
                1.0
            },
            // Ranges over [0.5, 1.0].
            infrastructure: 0.5 + (1.0 - unit(area.infrastructure_age)) * 0.5,
            land_use: area.land_use.risk_multiplier(),
        }
    }

    pub fn product(&self) -> f64 {
        self.rainfall * self.drainage * self.time * self.infrastructure * self.land_use
    }
}

/// Categorical risk bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Boundary values belong to the upper bracket.
    pub fn from_score(score: f64) -> Self {
        if score < MEDIUM_RISK_THRESHOLD {
            RiskLevel::Low
        } else if score < HIGH_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Score, bracket and the full breakdown that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreResult {
    pub final_score: f64,
    pub risk_level: RiskLevel,
    pub components: RiskComponents,
    pub multipliers: RiskMultipliers,
}

/// Stateless weighted multi-factor flood-risk scorer.
#[derive(Debug, Clone, Copy)]
pub struct RiskScorer {
    weights: RiskWeights,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self {
            weights: RISK_WEIGHTS,
        }
    }

    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    pub fn score(&self, area: &Area, scenario: &Scenario) -> RiskScoreResult {
        let components = RiskComponents::from_area(area);
        let multipliers = RiskMultipliers::for_scenario(area, scenario);
        let base_risk = components.weighted(&self.weights);
        let final_score = (base_risk * multipliers.product()).clamp(0.0, SCORE_CEILING);

        RiskScoreResult {
            final_score,
            risk_level: RiskLevel::from_score(final_score),
            components,
            multipliers,
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
