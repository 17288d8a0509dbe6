use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scoring::RiskScoreResult;
use crate::simulation::domain::round_to;
use crate::simulation::Area;

pub const DEFAULT_EVENT_DURATION_HOURS: u32 = 24;

/// Footprint of one grid cell (1.5 km × 1.5 km).
const AREA_SIZE_KM2: f64 = 2.25;
const EXPOSED_SHARE: f64 = 0.7;
const BASE_RESPONSE_MINUTES: f64 = 15.0;
const ESCALATION_SCORE: f64 = 0.7;
const ESCALATION_PENALTY: f64 = 1.5;
const MEDIUM_PRIORITY_SCORE: f64 = 0.4;

/// Evacuation ordering derived from the score. Thresholds differ from [`super::RiskLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvacuationPriority {
    Low,
    Medium,
    High,
}

impl EvacuationPriority {
    pub fn from_score(score: f64) -> Self {
        if score > ESCALATION_SCORE {
            EvacuationPriority::High
        } else if score > MEDIUM_PRIORITY_SCORE {
            EvacuationPriority::Medium
        } else {
            EvacuationPriority::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub affected_population: u64,
    pub economic_impact_millions: f64,
    /// Minutes.
    pub estimated_response_time: f64,
    pub evacuation_priority: EvacuationPriority,
    /// Placeholder count, drawn at random rather than derived from the area.
    pub critical_infrastructure_at_risk: u8,
    pub duration_hours: u32,
}

/// Translates a risk score into population, cost, and response estimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactPredictor;

impl ImpactPredictor {
    pub fn new() -> Self {
        Self
    }

    /// `duration_hours` is recorded on the estimate; the figures do not scale with it.
    pub fn predict<R: Rng + ?Sized>(
        &self,
        area: &Area,
        score: &RiskScoreResult,
        duration_hours: u32,
        rng: &mut R,
    ) -> ImpactEstimate {
        let final_score = score.final_score;

        let affected_population =
            (f64::from(area.population_density) * AREA_SIZE_KM2 * final_score * EXPOSED_SHARE)
                .floor() as u64;

        let cost_per_capita = rng.gen_range(1_000.0..=5_000.0);
        let economic_impact = affected_population as f64 * cost_per_capita;

        let mut response_time =
            BASE_RESPONSE_MINUTES * (1.0 + area.nearest_hospital_distance / 5.0);
        if final_score > ESCALATION_SCORE {
            response_time *= ESCALATION_PENALTY;
        }

        ImpactEstimate {
            affected_population,
            economic_impact_millions: round_to(economic_impact / 1_000_000.0, 2),
            estimated_response_time: round_to(response_time, 1),
            evacuation_priority: EvacuationPriority::from_score(final_score),
            critical_infrastructure_at_risk: rng.gen_range(0..=5),
            duration_hours,
        }
    }
}
