use std::ops::RangeInclusive;

use rand::Rng;

use super::cities::ResolvedCity;
use super::domain::Facility;

pub const DEFAULT_FACILITY_COUNT: usize = 8;
/// Maximum jitter, in degrees, between a facility and the city anchor.
pub const FACILITY_JITTER_DEG: f64 = 0.04;

const CAPACITY_BEDS: RangeInclusive<u32> = 100..=800;
const EMERGENCY_BEDS: RangeInclusive<u32> = 10..=50;
const FLOOD_RESISTANT_PROBABILITY: f64 = 1.0 / 3.0;

/// Places medical facilities around a city anchor, independently of the area grid.
#[derive(Debug, Clone, Copy)]
pub struct FacilityGenerator {
    count: usize,
}

impl FacilityGenerator {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn generate<R: Rng + ?Sized>(&self, city: &ResolvedCity, rng: &mut R) -> Vec<Facility> {
        (0..self.count)
            .map(|index| Facility {
                id: format!("hospital_{index}"),
                name: format!("{} Medical Center {}", city.name, index + 1),
                location: city.coordinate.offset(
                    rng.gen_range(-FACILITY_JITTER_DEG..=FACILITY_JITTER_DEG),
                    rng.gen_range(-FACILITY_JITTER_DEG..=FACILITY_JITTER_DEG),
                ),
                capacity: rng.gen_range(CAPACITY_BEDS),
                emergency_capacity: rng.gen_range(EMERGENCY_BEDS),
                flood_resistant: rng.gen_bool(FLOOD_RESISTANT_PROBABILITY),
            })
            .collect()
    }
}

impl Default for FacilityGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FACILITY_COUNT)
    }
}
