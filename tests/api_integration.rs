#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use crowd_forecast::api::{AppState, router};
use crowd_forecast::config::ForecastConfig;

fn state_for(preset: &str) -> Arc<AppState> {
    let mut config = ForecastConfig::from_preset(preset).expect("preset exists");
    config.forecast.seed = Some(8);
    Arc::new(AppState::from_config(config))
}

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn zones_lists_custom_config_zones() {
    let config = ForecastConfig::from_toml_file(std::path::Path::new(
        "scenarios/paris_custom_zones.toml",
    ))
    .unwrap();
    let (status, json) = get(Arc::new(AppState::from_config(config)), "/zones").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|z| z["id"].as_str())
        .collect();
    assert_eq!(ids, ["louvre", "marais", "canal", "buttes"]);
}

#[tokio::test]
async fn fallback_preset_reports_zero_distances() {
    let (status, json) = get(state_for("fallback"), "/forecast?hour=3").await;
    assert_eq!(status, StatusCode::OK);
    let nearby = json["nearby"].as_array().unwrap();
    assert_eq!(nearby.len(), 4);
    assert!(nearby.iter().all(|z| z["distance_km"] == 0.0));
    assert_eq!(json["zone_cards"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn forecast_report_shape() {
    let (status, json) = get(state_for("london"), "/forecast?lat=51.5074&lng=-0.1278&hour=23").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hourly"][0]["hour_of_day"], 23);
    assert_eq!(json["hourly"][1]["hour_of_day"], 0);
    assert_eq!(json["best_times"].as_array().map(Vec::len), Some(3));
    let baseline = json["baseline"].as_f64().unwrap();
    assert!((25.0..=95.0).contains(&baseline));
}

#[tokio::test]
async fn out_of_range_longitude_is_rejected() {
    let (status, json) = get(state_for("nyc"), "/forecast?lat=0&lng=181").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("invalid coordinate"));
}
