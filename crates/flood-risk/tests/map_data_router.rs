use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use flood_risk::{risk_router, FloodRiskService};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    risk_router(Arc::new(FloodRiskService::default()))
}

async fn get(uri: &str) -> (StatusCode, header::HeaderMap, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, headers, body)
}

#[tokio::test]
async fn map_data_returns_scored_grid_for_city() {
    let (status, headers, body) = get("/api/real-time/map-data?city=Mumbai&seed=7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body["status"], "success");
    assert_eq!(body["city"], "Mumbai");
    assert_eq!(body["areas"].as_array().unwrap().len(), 144);
    assert_eq!(body["hospitals"].as_array().unwrap().len(), 8);
    assert_eq!(body["statistics"]["total_areas"], 144);

    let first = &body["areas"][0];
    assert!(first["id"].as_str().unwrap().starts_with("district_"));
    let score = first["risk_assessment"]["final_score"].as_f64().unwrap();
    assert!((0.0..=0.95).contains(&score));
    assert!(first.get("impact").is_none());
}

#[tokio::test]
async fn positions_are_lat_lng_pairs() {
    let (status, _, body) = get("/api/real-time/map-data?city=Mumbai&seed=1&grid_size=2").await;
    assert_eq!(status, StatusCode::OK);

    let area = &body["areas"][0];
    assert!(area["center"][0].is_f64());
    assert!(area["center"][1].is_f64());
    assert_eq!(area["center"].as_array().unwrap().len(), 2);
    let bounds = area["bounds"].as_array().unwrap();
    assert_eq!(bounds.len(), 2);
    assert!(bounds[0][0].as_f64().unwrap() < bounds[1][0].as_f64().unwrap());

    let hospital = &body["hospitals"][0];
    assert_eq!(hospital["location"].as_array().unwrap().len(), 2);
    assert!(hospital["location"][0].is_f64());
}

#[tokio::test]
async fn legacy_alias_serves_the_default_city() {
    let (status, _, body) = get("/api?seed=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "New York");
    assert_eq!(body["known_city"], true);
}

#[tokio::test]
async fn same_seed_produces_identical_areas() {
    let (_, _, first) = get("/api/real-time/map-data?city=Tokyo&seed=99&grid_size=6").await;
    let (_, _, second) = get("/api/real-time/map-data?city=Tokyo&seed=99&grid_size=6").await;
    assert_eq!(first["areas"], second["areas"]);
    assert_eq!(first["areas"].as_array().unwrap().len(), 36);
}

#[tokio::test]
async fn non_numeric_rainfall_is_a_bad_request() {
    let (status, _, body) = get("/api/real-time/map-data?rainfall=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn negative_drainage_is_rejected() {
    let (status, _, body) = get("/api/real-time/map-data?drainage=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("drainage"));
}

#[tokio::test]
async fn oversized_grid_is_rejected() {
    let (status, _, body) = get("/api/real-time/map-data?grid_size=500").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("grid_size"));
}

#[tokio::test]
async fn impact_estimates_are_opt_in() {
    let (status, _, body) = get(
        "/api/real-time/map-data?city=London&seed=3&grid_size=4&include_impact=true&duration_hours=48",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let areas = body["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 16);
    for area in areas {
        assert_eq!(area["impact"]["duration_hours"], 48);
        assert!(area["impact"]["affected_population"].is_u64());
    }
    assert!(body["statistics"]["total_affected_population"].is_u64());
}

#[tokio::test]
async fn weather_is_attached_only_on_request() {
    let (_, _, plain) = get("/api/real-time/map-data?seed=2&grid_size=2").await;
    assert!(plain["scenario"].get("weather").is_none());

    let (status, _, body) =
        get("/api/real-time/map-data?seed=2&grid_size=2&include_weather=true").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["scenario"]["weather"]["humidity"].is_f64());
}

#[tokio::test]
async fn unknown_city_falls_back_to_default_anchor() {
    let (status, _, body) = get("/api/real-time/map-data?city=Atlantis&seed=5&grid_size=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Atlantis");
    assert_eq!(body["known_city"], false);
    assert_eq!(body["coordinate"][0], 40.7128);
    assert_eq!(body["coordinate"][1], -74.006);
}

#[tokio::test]
async fn cities_endpoint_lists_builtin_catalog() {
    let (status, _, body) = get("/api/cities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["default_city"], "New York");
    let names: Vec<&str> = body["cities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|city| city["name"].as_str().unwrap())
        .collect();
    for expected in ["New York", "Mumbai", "Tokyo", "London", "Shanghai", "Miami"] {
        assert!(names.contains(&expected), "missing {expected}");
    }
}

#[tokio::test]
async fn weather_endpoint_reports_observation() {
    let (status, _, body) = get("/api/weather?city=miami").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"]["name"], "Miami");
    assert!(body["observation"]["temperature"].is_f64());
}
