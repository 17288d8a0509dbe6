use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::risk::Scenario;
use crate::service::{AssessmentRequest, FloodRiskService};

/// Router builder exposing the map-data, city, and weather endpoints.
pub fn risk_router(service: Arc<FloodRiskService>) -> Router {
    Router::new()
        .route("/api/real-time/map-data", get(map_data_handler))
        .route("/api", get(map_data_handler))
        .route("/api/cities", get(cities_handler))
        .route("/api/weather", get(weather_handler))
        .with_state(service)
}

/// Query string accepted by the map-data endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MapDataQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default = "unit_factor")]
    pub rainfall: f64,
    #[serde(default = "unit_factor")]
    pub drainage: f64,
    #[serde(default)]
    pub night: bool,
    #[serde(default)]
    pub grid_size: Option<usize>,
    #[serde(default)]
    pub include_impact: bool,
    #[serde(default)]
    pub include_weather: bool,
    #[serde(default)]
    pub duration_hours: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn unit_factor() -> f64 {
    1.0
}

impl MapDataQuery {
    pub fn into_request(self) -> Result<AssessmentRequest, AppError> {
        let scenario = Scenario::new(self.rainfall, self.drainage, self.night)?;
        Ok(AssessmentRequest {
            city: self.city.filter(|city| !city.trim().is_empty()),
            scenario,
            grid_size: self.grid_size,
            include_impact: self.include_impact,
            include_weather: self.include_weather,
            duration_hours: self.duration_hours,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub city: Option<String>,
}

pub(crate) async fn map_data_handler(
    State(service): State<Arc<FloodRiskService>>,
    query: Result<Query<MapDataQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    let seed = query.seed;
    let request = query.into_request()?;

    tracing::debug!(
        city = request.city.as_deref().unwrap_or("<default>"),
        rainfall = request.scenario.rainfall_intensity(),
        drainage = request.scenario.drainage_factor(),
        night = request.scenario.is_night(),
        "map-data request"
    );

    let assessment = match seed {
        Some(seed) => service.assess(&request, &mut StdRng::seed_from_u64(seed))?,
        None => service.assess(&request, &mut rand::thread_rng())?,
    };

    Ok((
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Json(assessment),
    )
        .into_response())
}

pub(crate) async fn cities_handler(State(service): State<Arc<FloodRiskService>>) -> Response {
    let payload = json!({
        "default_city": service.catalog().default_city(),
        "cities": service.cities(),
    });
    Json(payload).into_response()
}

pub(crate) async fn weather_handler(
    State(service): State<Arc<FloodRiskService>>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    let city = query
        .city
        .unwrap_or_else(|| service.catalog().default_city().to_string());
    Ok(Json(service.weather(&city)).into_response())
}
