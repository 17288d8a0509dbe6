use serde::Serialize;

use crate::simulation::WeatherObservation;

/// Validated scoring inputs for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    rainfall_intensity: f64,
    drainage_factor: f64,
    is_night: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    weather: Option<WeatherObservation>,
}

impl Scenario {
    /// Both factors must be finite and non-negative.
    pub fn new(
        rainfall_intensity: f64,
        drainage_factor: f64,
        is_night: bool,
    ) -> Result<Self, ScenarioError> {
        Ok(Self {
            rainfall_intensity: validate_factor("rainfall", rainfall_intensity)?,
            drainage_factor: validate_factor("drainage", drainage_factor)?,
            is_night,
            weather: None,
        })
    }

    /// Attach an observation. The current scoring formula does not read it.
    pub fn with_weather(mut self, observation: WeatherObservation) -> Self {
        self.weather = Some(observation);
        self
    }

    pub fn rainfall_intensity(&self) -> f64 {
        self.rainfall_intensity
    }

    pub fn drainage_factor(&self) -> f64 {
        self.drainage_factor
    }

    pub fn is_night(&self) -> bool {
        self.is_night
    }

    pub fn weather(&self) -> Option<&WeatherObservation> {
        self.weather.as_ref()
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            rainfall_intensity: 1.0,
            drainage_factor: 1.0,
            is_night: false,
            weather: None,
        }
    }
}

fn validate_factor(field: &'static str, value: f64) -> Result<f64, ScenarioError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ScenarioError::InvalidFactor { field, value })
    }
}

/// Rejected scenario input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error("{field} must be a finite, non-negative number (received {value})")]
    InvalidFactor { field: &'static str, value: f64 },
}
