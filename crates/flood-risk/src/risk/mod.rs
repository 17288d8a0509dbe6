//! Multi-factor flood-risk scoring and the impact estimates derived from a score.

mod impact;
mod scenario;
mod scoring;
mod statistics;

#[cfg(test)]
mod tests;

pub use impact::{
    EvacuationPriority, ImpactEstimate, ImpactPredictor, DEFAULT_EVENT_DURATION_HOURS,
};
pub use scenario::{Scenario, ScenarioError};
pub use scoring::{
    RiskComponents, RiskLevel, RiskMultipliers, RiskScoreResult, RiskScorer, RiskWeights,
    HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, RISK_WEIGHTS, SCORE_CEILING,
};
pub use statistics::RiskStatistics;
