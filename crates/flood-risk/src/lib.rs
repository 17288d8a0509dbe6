//! Synthetic urban flood-risk engine.
//!
//! Generates a district grid and medical facilities around a city, scores each
//! district's flood risk under a rainfall scenario, and estimates the impact of
//! a flood on the scored districts. All values are simulated.

pub mod config;
pub mod error;
pub mod risk;
pub mod router;
pub mod service;
pub mod simulation;
pub mod telemetry;

pub use router::risk_router;
pub use service::{
    AreaAssessment, AssessmentError, AssessmentRequest, CityAssessment, CitySnapshot,
    CityWeather, FloodRiskService,
};
