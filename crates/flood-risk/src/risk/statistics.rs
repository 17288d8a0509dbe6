use serde::{Deserialize, Serialize};

use super::impact::ImpactEstimate;
use super::scoring::{RiskLevel, RiskScoreResult};

/// City-wide summary used by the map view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskStatistics {
    pub total_areas: usize,
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
    pub avg_risk_score: f64,
    pub max_risk_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_affected_population: Option<u64>,
}

impl RiskStatistics {
    pub fn from_scores<'a, I>(scores: I) -> Self
    where
        I: IntoIterator<Item = &'a RiskScoreResult>,
    {
        let mut stats = Self::default();
        let mut score_sum = 0.0;

        for score in scores {
            stats.total_areas += 1;
            score_sum += score.final_score;
            stats.max_risk_score = stats.max_risk_score.max(score.final_score);
            match score.risk_level {
                RiskLevel::High => stats.high_risk += 1,
                RiskLevel::Medium => stats.medium_risk += 1,
                RiskLevel::Low => stats.low_risk += 1,
            }
        }

        if stats.total_areas > 0 {
            stats.avg_risk_score = score_sum / stats.total_areas as f64;
        }
        stats
    }

    pub fn with_impacts<'a, I>(mut self, impacts: I) -> Self
    where
        I: IntoIterator<Item = &'a ImpactEstimate>,
    {
        self.total_affected_population = Some(
            impacts
                .into_iter()
                .map(|impact| impact.affected_population)
                .sum(),
        );
        self
    }

    pub fn share(&self, level: RiskLevel) -> f64 {
        if self.total_areas == 0 {
            return 0.0;
        }
        let count = match level {
            RiskLevel::High => self.high_risk,
            RiskLevel::Medium => self.medium_risk,
            RiskLevel::Low => self.low_risk,
        };
        count as f64 / self.total_areas as f64
    }
}
