use super::common::*;
use crate::risk::{ImpactPredictor, RiskLevel, RiskStatistics};
use rand::rngs::mock::StepRng;

#[test]
fn counts_levels_and_averages_scores() {
    let scores = [
        score_result(0.1),
        score_result(0.33),
        score_result(0.5),
        score_result(0.9),
    ];
    let stats = RiskStatistics::from_scores(&scores);

    assert_eq!(stats.total_areas, 4);
    assert_eq!(stats.low_risk, 1);
    assert_eq!(stats.medium_risk, 2);
    assert_eq!(stats.high_risk, 1);
    assert!((stats.avg_risk_score - 0.4575).abs() < 1e-9);
    assert_eq!(stats.max_risk_score, 0.9);
    assert_eq!(stats.share(RiskLevel::Medium), 0.5);
    assert!(stats.total_affected_population.is_none());
}

#[test]
fn empty_input_reports_zeroes() {
    let stats = RiskStatistics::from_scores(std::iter::empty());
    assert_eq!(stats, RiskStatistics::default());
    assert_eq!(stats.share(RiskLevel::High), 0.0);
}

#[test]
fn impacts_add_total_affected_population() {
    let mut rng = StepRng::new(0, 0);
    let predictor = ImpactPredictor::new();
    let scores = [score_result(0.5), score_result(0.5)];
    let impacts: Vec<_> = scores
        .iter()
        .map(|score| predictor.predict(&area(), score, 24, &mut rng))
        .collect();

    let stats = RiskStatistics::from_scores(&scores).with_impacts(&impacts);
    assert_eq!(stats.total_affected_population, Some(14_962));
}
