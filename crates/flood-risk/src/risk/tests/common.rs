use crate::risk::{RiskComponents, RiskLevel, RiskMultipliers, RiskScoreResult, Scenario};
use crate::simulation::{Area, Bounds, Coordinate, LandUse};

pub(super) fn area() -> Area {
    let center = Coordinate::new(19.0760, 72.8777);
    Area {
        id: "district_6_6".to_string(),
        name: "District G7".to_string(),
        city: "Mumbai".to_string(),
        center,
        bounds: Bounds::around(center, 0.0075),
        elevation: 12.0,
        population_density: 9_500,
        elderly_percentage: 12.0,
        children_percentage: 22.0,
        historical_floods: 2,
        nearest_hospital_distance: 3.4,
        drainage_quality: 0.55,
        land_use: LandUse::Commercial,
        infrastructure_age: 0.4,
    }
}

/// Every attribute at its riskiest value.
pub(super) fn saturated_area() -> Area {
    Area {
        elevation: 0.0,
        population_density: 20_000,
        elderly_percentage: 30.0,
        children_percentage: 40.0,
        historical_floods: 5,
        nearest_hospital_distance: 1.0e6,
        drainage_quality: 0.0,
        land_use: LandUse::Waterfront,
        infrastructure_age: 0.0,
        ..area()
    }
}

pub(super) fn scenario(rainfall: f64, drainage: f64, night: bool) -> Scenario {
    Scenario::new(rainfall, drainage, night).expect("valid scenario")
}

pub(super) fn score_result(final_score: f64) -> RiskScoreResult {
    RiskScoreResult {
        final_score,
        risk_level: RiskLevel::from_score(final_score),
        components: RiskComponents::from_area(&area()),
        multipliers: RiskMultipliers::for_scenario(&area(), &Scenario::default()),
    }
}
