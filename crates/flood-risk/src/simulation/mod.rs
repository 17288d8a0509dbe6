//! Synthetic city data: the district grid, medical facilities, and weather readings.

mod cities;
pub mod domain;
mod facility;
mod grid;
mod weather;

pub use cities::{CityCatalog, CityView, ResolvedCity};
pub use domain::{Area, Bounds, Coordinate, Facility, LandUse};
pub use facility::{FacilityGenerator, DEFAULT_FACILITY_COUNT, FACILITY_JITTER_DEG};
pub use grid::{GeoGridGenerator, CELL_SPACING_DEG, DEFAULT_GRID_SIZE};
pub use weather::{SimulatedWeather, WeatherObservation, WeatherProvider};
