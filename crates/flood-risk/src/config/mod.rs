use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::simulation::{CityCatalog, Coordinate, DEFAULT_FACILITY_COUNT, DEFAULT_GRID_SIZE};

const DEFAULT_MAX_GRID_SIZE: usize = 48;
const FACILITY_COUNT_RANGE: std::ops::RangeInclusive<usize> = 5..=8;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub simulation: SimulationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            simulation: SimulationConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Generator defaults and the city table.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub default_city: String,
    pub grid_size: usize,
    pub max_grid_size: usize,
    pub facility_count: usize,
    pub extra_cities: Vec<(String, Coordinate)>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_city: "New York".to_string(),
            grid_size: DEFAULT_GRID_SIZE,
            max_grid_size: DEFAULT_MAX_GRID_SIZE,
            facility_count: DEFAULT_FACILITY_COUNT,
            extra_cities: Vec::new(),
        }
    }
}

impl SimulationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_city = env::var("FLOOD_DEFAULT_CITY").unwrap_or(defaults.default_city);
        let grid_size = parse_usize_var("FLOOD_GRID_SIZE", defaults.grid_size)?;
        let max_grid_size = parse_usize_var("FLOOD_MAX_GRID_SIZE", defaults.max_grid_size)?;
        let facility_count = parse_usize_var("FLOOD_HOSPITAL_COUNT", defaults.facility_count)?;
        let extra_cities = match env::var("FLOOD_EXTRA_CITIES") {
            Ok(raw) => parse_city_list(&raw)?,
            Err(_) => Vec::new(),
        };

        if grid_size == 0 || grid_size > max_grid_size {
            return Err(ConfigError::InvalidGridSize {
                grid_size,
                max_grid_size,
            });
        }
        if !FACILITY_COUNT_RANGE.contains(&facility_count) {
            return Err(ConfigError::InvalidFacilityCount(facility_count));
        }

        let config = Self {
            default_city,
            grid_size,
            max_grid_size,
            facility_count,
            extra_cities,
        };
        if !config.city_catalog().resolve(&config.default_city).known {
            return Err(ConfigError::UnknownDefaultCity(config.default_city));
        }
        Ok(config)
    }

    /// Built-in cities, extended with any configured entries.
    pub fn city_catalog(&self) -> CityCatalog {
        self.extra_cities
            .iter()
            .fold(CityCatalog::builtin(), |catalog, (name, coordinate)| {
                catalog.with_city(name.clone(), *coordinate)
            })
            .with_default(&self.default_city)
    }
}

fn parse_usize_var(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { variable: name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Parse `Name:lat:lng` entries separated by commas.
pub fn parse_city_list(raw: &str) -> Result<Vec<(String, Coordinate)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || ConfigError::InvalidCity(entry.to_string());
            let mut parts = entry.rsplitn(3, ':');
            let lng = parts.next().and_then(|value| value.trim().parse::<f64>().ok());
            let lat = parts.next().and_then(|value| value.trim().parse::<f64>().ok());
            let name = parts.next().map(str::trim).filter(|name| !name.is_empty());
            match (name, lat, lng) {
                (Some(name), Some(lat), Some(lng))
                    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) =>
                {
                    Ok((name.to_string(), Coordinate::new(lat, lng)))
                }
                _ => Err(invalid()),
            }
        })
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str, value: String },
    InvalidGridSize { grid_size: usize, max_grid_size: usize },
    InvalidFacilityCount(usize),
    InvalidCity(String),
    UnknownDefaultCity(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable, value } => {
                write!(f, "{variable} must be a non-negative integer (got '{value}')")
            }
            ConfigError::InvalidGridSize {
                grid_size,
                max_grid_size,
            } => write!(
                f,
                "FLOOD_GRID_SIZE must be between 1 and FLOOD_MAX_GRID_SIZE ({max_grid_size}), got {grid_size}"
            ),
            ConfigError::InvalidFacilityCount(count) => write!(
                f,
                "FLOOD_HOSPITAL_COUNT must be between {} and {}, got {count}",
                FACILITY_COUNT_RANGE.start(),
                FACILITY_COUNT_RANGE.end()
            ),
            ConfigError::InvalidCity(entry) => write!(
                f,
                "FLOOD_EXTRA_CITIES entry '{entry}' must look like Name:lat:lng"
            ),
            ConfigError::UnknownDefaultCity(name) => write!(
                f,
                "FLOOD_DEFAULT_CITY '{name}' is neither a built-in city nor listed in FLOOD_EXTRA_CITIES"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
