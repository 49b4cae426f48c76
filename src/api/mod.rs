//! Read-only REST API for a dashboard front-end.
//!
//! Provides two GET endpoints:
//! - `/zones` - the zone list the engine was built with
//! - `/forecast` - a full forecast report for a coordinate and start hour

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::ForecastConfig;
use crate::forecast::ForecastEngine;

pub use types::{ErrorResponse, ForecastQuery};

/// Immutable application state shared across all request handlers.
///
/// Every request runs the engine with its own random source, so no locks
/// are needed.
pub struct AppState {
    /// Configuration the engine was built from; supplies the default
    /// location and seed.
    pub config: ForecastConfig,
    pub engine: ForecastEngine,
}

impl AppState {
    pub fn from_config(config: ForecastConfig) -> Self {
        let engine = config.build_engine();
        Self { config, engine }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/zones", get(handlers::get_zones))
        .route("/forecast", get(handlers::get_forecast))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
