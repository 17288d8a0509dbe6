use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::Coordinate;

/// Point-in-time weather reading for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Millimetres.
    pub precipitation: f64,
    /// Metres per second.
    pub wind_speed: f64,
    /// Percent of sky covered.
    pub cloud_cover: f64,
    pub timestamp: DateTime<Utc>,
}

/// Source of weather observations. Live integrations plug in here.
pub trait WeatherProvider: Send + Sync {
    fn observe(&self, location: Coordinate) -> WeatherObservation;
}

/// Stand-in provider producing plausible random readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedWeather;

impl SimulatedWeather {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, timestamp: DateTime<Utc>) -> WeatherObservation {
        WeatherObservation {
            temperature: rng.gen_range(15.0..30.0),
            humidity: rng.gen_range(60.0..95.0),
            precipitation: rng.gen_range(0.0..50.0),
            wind_speed: rng.gen_range(0.0..15.0),
            cloud_cover: rng.gen_range(0.0..100.0),
            timestamp,
        }
    }
}

impl WeatherProvider for SimulatedWeather {
    fn observe(&self, _location: Coordinate) -> WeatherObservation {
        Self::sample(&mut rand::thread_rng(), Utc::now())
    }
}
