use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::Coordinate;

const DEFAULT_CITY: &str = "New York";

const BUILTIN_CITIES: [(&str, Coordinate); 6] = [
    ("New York", Coordinate::new(40.7128, -74.0060)),
    ("Mumbai", Coordinate::new(19.0760, 72.8777)),
    ("Tokyo", Coordinate::new(35.6762, 139.6503)),
    ("London", Coordinate::new(51.5074, -0.1278)),
    ("Shanghai", Coordinate::new(31.2304, 121.4737)),
    ("Miami", Coordinate::new(25.7617, -80.1918)),
];

#[derive(Debug, Clone)]
struct CityEntry {
    name: String,
    coordinate: Coordinate,
}

/// City name to base coordinate lookup with a fallback entry.
///
/// Names are matched case-insensitively. Resolution is total: names that are
/// not in the catalog resolve to the default city's coordinate.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    entries: BTreeMap<String, CityEntry>,
    default_key: String,
}

/// Outcome of resolving a requested city name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCity {
    /// The name as requested, trimmed.
    pub name: String,
    pub coordinate: Coordinate,
    /// `false` when the request fell back to the default city.
    pub known: bool,
}

/// Catalog entry exposed to the city listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityView {
    pub name: String,
    pub coordinate: Coordinate,
}

fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl CityCatalog {
    pub fn builtin() -> Self {
        let mut catalog = Self {
            entries: BTreeMap::new(),
            default_key: catalog_key(DEFAULT_CITY),
        };
        for (name, coordinate) in BUILTIN_CITIES {
            catalog.insert(name, coordinate);
        }
        catalog
    }

    /// Add or replace a city entry.
    pub fn with_city(mut self, name: impl Into<String>, coordinate: Coordinate) -> Self {
        self.insert(name, coordinate);
        self
    }

    /// Pick the fallback city. Names missing from the catalog are ignored.
    pub fn with_default(mut self, name: &str) -> Self {
        let key = catalog_key(name);
        if self.entries.contains_key(&key) {
            self.default_key = key;
        }
        self
    }

    fn insert(&mut self, name: impl Into<String>, coordinate: Coordinate) {
        let name = name.into().trim().to_string();
        self.entries
            .insert(catalog_key(&name), CityEntry { name, coordinate });
    }

    fn default_entry(&self) -> &CityEntry {
        // default_key is only ever set to a key present in `entries`,
        // and entries are never removed.
        &self.entries[&self.default_key]
    }

    pub fn default_city(&self) -> &str {
        &self.default_entry().name
    }

    pub fn resolve(&self, name: &str) -> ResolvedCity {
        let requested = name.trim();
        match self.entries.get(&catalog_key(requested)) {
            Some(entry) => ResolvedCity {
                name: entry.name.clone(),
                coordinate: entry.coordinate,
                known: true,
            },
            None => {
                let fallback = self.default_entry();
                ResolvedCity {
                    name: if requested.is_empty() {
                        fallback.name.clone()
                    } else {
                        requested.to_string()
                    },
                    coordinate: fallback.coordinate,
                    known: false,
                }
            }
        }
    }

    pub fn cities(&self) -> Vec<CityView> {
        self.entries
            .values()
            .map(|entry| CityView {
                name: entry.name.clone(),
                coordinate: entry.coordinate,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
