use rand::Rng;
use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees. Serialized as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn offset(self, d_lat: f64, d_lng: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lng: self.lng + d_lng,
        }
    }
}

/// Rectangular extent of a grid cell. Serialized as `[south_west, north_east]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Coordinate; 2]", into = "[Coordinate; 2]")]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.lat, coordinate.lng]
    }
}

impl From<[Coordinate; 2]> for Bounds {
    fn from([south_west, north_east]: [Coordinate; 2]) -> Self {
        Self {
            south_west,
            north_east,
        }
    }
}

impl From<Bounds> for [Coordinate; 2] {
    fn from(bounds: Bounds) -> Self {
        [bounds.south_west, bounds.north_east]
    }
}

impl Bounds {
    pub fn around(center: Coordinate, half_extent: f64) -> Self {
        Self {
            south_west: center.offset(-half_extent, -half_extent),
            north_east: center.offset(half_extent, half_extent),
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }
}

/// Zoning category of an area. Categorical, not ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandUse {
    Residential,
    Commercial,
    Industrial,
    Park,
    Waterfront,
}

impl LandUse {
    pub const ALL: [LandUse; 5] = [
        LandUse::Residential,
        LandUse::Commercial,
        LandUse::Industrial,
        LandUse::Park,
        LandUse::Waterfront,
    ];

    /// Draw weights paired index-for-index with [`LandUse::ALL`].
    pub const WEIGHTS: [f64; 5] = [0.5, 0.2, 0.1, 0.1, 0.1];

    pub const fn label(self) -> &'static str {
        match self {
            LandUse::Residential => "residential",
            LandUse::Commercial => "commercial",
            LandUse::Industrial => "industrial",
            LandUse::Park => "park",
            LandUse::Waterfront => "waterfront",
        }
    }

    /// Scoring multiplier for the category.
    pub const fn risk_multiplier(self) -> f64 {
        match self {
            LandUse::Waterfront => 1.5,
            LandUse::Residential => 1.2,
            LandUse::Commercial => 1.0,
            LandUse::Industrial => 0.9,
            LandUse::Park => 0.7,
        }
    }

    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total: f64 = Self::WEIGHTS.iter().sum();
        let mut remaining = rng.gen::<f64>() * total;
        for (land_use, weight) in Self::ALL.iter().zip(Self::WEIGHTS) {
            if remaining < weight {
                return *land_use;
            }
            remaining -= weight;
        }
        // Float drift past the last bucket.
        LandUse::Waterfront
    }
}

/// Synthetic urban zone with the attributes consumed by the risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    pub city: String,
    pub center: Coordinate,
    pub bounds: Bounds,
    /// Metres above sea level.
    pub elevation: f64,
    /// People per km².
    pub population_density: u32,
    pub elderly_percentage: f64,
    pub children_percentage: f64,
    pub historical_floods: u32,
    /// Kilometres.
    pub nearest_hospital_distance: f64,
    /// 0 = no drainage, 1 = excellent.
    pub drainage_quality: f64,
    pub land_use: LandUse,
    /// 0 = new, 1 = end of life.
    pub infrastructure_age: f64,
}

/// Hospital or medical facility placed near the city centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    /// Beds.
    pub capacity: u32,
    pub emergency_capacity: u32,
    pub flood_resistant: bool,
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn coordinates_and_bounds_serialize_as_pairs() {
        let center = Coordinate::new(19.076, 72.8777);
        assert_eq!(
            serde_json::to_value(center).expect("serializes"),
            serde_json::json!([19.076, 72.8777])
        );

        let bounds = Bounds::around(Coordinate::new(10.0, 20.0), 0.5);
        assert_eq!(
            serde_json::to_value(bounds).expect("serializes"),
            serde_json::json!([[9.5, 19.5], [10.5, 20.5]])
        );

        let parsed: Bounds =
            serde_json::from_str("[[1.0, 2.0], [3.0, 4.0]]").expect("deserializes");
        assert_eq!(parsed.north_east, Coordinate::new(3.0, 4.0));
    }

    #[test]
    fn land_use_weights_sum_to_one() {
        let total: f64 = LandUse::WEIGHTS.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_draw_selects_residential() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(LandUse::sample(&mut rng), LandUse::Residential);
    }

    #[test]
    fn residential_dominates_large_samples() {
        let mut rng = StdRng::seed_from_u64(11);
        let residential = (0..2_000)
            .filter(|_| LandUse::sample(&mut rng) == LandUse::Residential)
            .count();
        assert!(residential > 850 && residential < 1_150, "got {residential}");
    }

    #[test]
    fn bounds_contain_their_center() {
        let center = Coordinate::new(19.076, 72.8777);
        let bounds = Bounds::around(center, 0.0075);
        assert!(bounds.contains(center));
        assert!(!bounds.contains(center.offset(0.01, 0.0)));
    }

    #[test]
    fn round_to_matches_presentation_precision() {
        assert_eq!(round_to(3.14159, 1), 3.1);
        assert_eq!(round_to(0.456, 2), 0.46);
    }
}
