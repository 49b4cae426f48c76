//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::{NaiveDateTime, Timelike};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::AppState;
use super::types::{ErrorResponse, ForecastQuery};
use crate::error::ForecastError;
use crate::forecast::ForecastReport;
use crate::geo::Coordinate;
use crate::location::{OfflineEnricher, resolve_location};
use crate::zones::Zone;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

impl From<ForecastError> for ApiError {
    fn from(e: ForecastError) -> Self {
        let status = match &e {
            ForecastError::InvalidCoordinate { .. } | ForecastError::InvalidHour(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, e.to_string())
    }
}

/// Returns the zones the engine was built with.
///
/// `GET /zones` → 200 + `Vec<Zone>` JSON
pub async fn get_zones(State(state): State<Arc<AppState>>) -> Json<Vec<Zone>> {
    Json(state.engine.zones().to_vec())
}

/// Runs the forecast for the queried coordinate and hour.
///
/// `GET /forecast` → report for the configured location at the current hour
/// `GET /forecast?lat=51.5&lng=-0.12&hour=7` → report for that coordinate
/// `GET /forecast?lat=91&lng=0` → 400 + `ErrorResponse`
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastReport>, ApiError> {
    let location = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => resolve_location(Coordinate { lat, lng }, &OfflineEnricher),
        (None, None) => state.config.user_location(),
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "`lat` and `lng` must be given together",
            ));
        }
    };
    let now = request_time(query.hour)?;

    let report = match state.config.forecast.seed {
        Some(seed) => state
            .engine
            .run(&location, now, &mut StdRng::seed_from_u64(seed)),
        None => state.engine.run(&location, now, &mut rand::rng()),
    }?;
    Ok(Json(report))
}

/// Local time, moved to `hour` when one is requested.
fn request_time(hour: Option<u32>) -> Result<NaiveDateTime, ForecastError> {
    let now = chrono::Local::now().naive_local();
    match hour {
        Some(h) => now.with_hour(h).ok_or(ForecastError::InvalidHour(h)),
        None => Ok(now),
    }
}
