use rand::Rng;

use super::cities::ResolvedCity;
use super::domain::{round_to, Area, Bounds, Coordinate, LandUse};

/// Degrees between neighbouring cell centres on both axes.
pub const CELL_SPACING_DEG: f64 = 0.015;
pub const DEFAULT_GRID_SIZE: usize = 12;

const ELEVATION_FLOOR: f64 = 0.0;
const POPULATION_FLOOR: f64 = 100.0;
const ELDERLY_RANGE: (f64, f64) = (5.0, 30.0);
const CHILDREN_RANGE: (f64, f64) = (10.0, 40.0);

/// Builds a square lattice of synthetic districts around a city anchor.
///
/// Distance-dependent attributes are derived from the cell's distance to the
/// centre cell, measured in cell units: elevation and elderly share rise
/// outward while density, children share and drainage fall off.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoGridGenerator;

impl GeoGridGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate `dimension²` areas for `city`. Row offsets move latitude and
    /// column offsets move longitude, both in `-dimension/2..dimension - dimension/2`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        city: &ResolvedCity,
        dimension: usize,
        rng: &mut R,
    ) -> Vec<Area> {
        let origin = (dimension / 2) as f64;
        let mut areas = Vec::with_capacity(dimension * dimension);

        for row in 0..dimension {
            for col in 0..dimension {
                let row_offset = row as f64 - origin;
                let col_offset = col as f64 - origin;
                let center = city.coordinate.offset(
                    row_offset * CELL_SPACING_DEG,
                    col_offset * CELL_SPACING_DEG,
                );
                let distance = row_offset.hypot(col_offset);
                areas.push(self.district(city, row, col, center, distance, rng));
            }
        }

        tracing::debug!(
            city = %city.name,
            dimension,
            areas = areas.len(),
            "generated district grid"
        );
        areas
    }

    fn district<R: Rng + ?Sized>(
        &self,
        city: &ResolvedCity,
        row: usize,
        col: usize,
        center: Coordinate,
        d: f64,
        rng: &mut R,
    ) -> Area {
        let elevation = (2.0 + d * 5.0 + rng.gen_range(-3.0..3.0)).max(ELEVATION_FLOOR);

        let population_density = (15_000.0 * (-d / 3.0).exp() + rng.gen_range(-2_000.0..2_000.0))
            .trunc()
            .max(POPULATION_FLOOR);

        let elderly = (8.0 + d * 1.5 + rng.gen_range(-3.0..3.0))
            .clamp(ELDERLY_RANGE.0, ELDERLY_RANGE.1);
        let children = (25.0 - d * 1.2 + rng.gen_range(-5.0..5.0))
            .clamp(CHILDREN_RANGE.0, CHILDREN_RANGE.1);

        let flood_probability =
            ((15.0 - elevation) / 15.0).max(0.0) + rng.gen_range(0.0..0.3);
        let historical_floods = (flood_probability * 3.0 + rng.gen_range(0.0..2.0)).trunc();

        let hospital_distance = rng.gen_range(0.5..8.0) + d * 0.3;
        let drainage = (0.3 + rng.gen_range(0.0..0.6) - d * 0.05).clamp(0.0, 1.0);
        let land_use = LandUse::sample(rng);
        let infrastructure_age = rng.gen_range(0.1..1.0);

        Area {
            id: format!("district_{row}_{col}"),
            name: format!("District {}{}", row_label(row), col + 1),
            city: city.name.clone(),
            center,
            bounds: Bounds::around(center, CELL_SPACING_DEG / 2.0),
            elevation: round_to(elevation, 1),
            population_density: population_density as u32,
            elderly_percentage: round_to(elderly, 1),
            children_percentage: round_to(children, 1),
            historical_floods: historical_floods as u32,
            nearest_hospital_distance: round_to(hospital_distance, 1),
            drainage_quality: round_to(drainage, 2),
            land_use,
            infrastructure_age: round_to(infrastructure_age, 2),
        }
    }
}

/// Spreadsheet-style row label: A..Z, AA..AZ, BA..
fn row_label(row: usize) -> String {
    let mut label = Vec::new();
    let mut n = row + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
