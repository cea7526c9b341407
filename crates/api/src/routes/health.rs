use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tutorgrid_core::lanes::PlacementKind;
use tutorgrid_core::models::time;

use crate::ApiState;

/// Liveness plus the board settings the screens need to draw their rows
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    grid_start: String,
    grid_end: String,
    grid_ticks: usize,
    default_placement: PlacementKind,
}

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
}

async fn health_check(State(state): State<Arc<ApiState>>) -> Json<HealthResponse> {
    let grid = state.scheduler.grid();
    Json(HealthResponse {
        status: "ok",
        grid_start: time::format(grid.first()),
        grid_end: time::format(grid.last()),
        grid_ticks: grid.len(),
        default_placement: state.default_placement,
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
}
