//! # Tutorgrid API
//!
//! The API crate hosts the scheduling service and the JSON endpoints the
//! schedule screens read from.
//!
//! ## Architecture
//!
//! - **Scheduler**: validation, the conflict gate and store writes
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: request extraction and response shaping
//! - **Middleware**: error mapping
//! - **Config**: environment configuration
//!
//! The API uses Axum as the web framework. Slots and reference data come
//! from the store traits in `tutorgrid_core::store`.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Scheduling service shared by every handler
pub mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError, Router};
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use tutorgrid_core::lanes::{PlacementKind, PlacementStrategy};
use tutorgrid_core::models::RoomId;

pub use scheduler::Scheduler;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub scheduler: Scheduler,
    /// Strategy used when a board request does not name one
    pub default_placement: PlacementKind,
    /// Fixed room columns for the room placement; `None` derives them per day
    pub rooms: Option<Vec<RoomId>>,
}

impl ApiState {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            default_placement: PlacementKind::default(),
            rooms: None,
        }
    }

    pub fn strategy(&self, requested: Option<PlacementKind>) -> Box<dyn PlacementStrategy + Send + Sync> {
        requested
            .unwrap_or(self.default_placement)
            .build(self.rooms.as_deref())
    }
}

/// Installs the global `tracing` subscriber at the given level.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with every route and the request trace layer.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot management endpoints
        .merge(routes::slots::routes())
        // Board, conflict and directory endpoints
        .merge(routes::board::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and state.
///
/// Logging must already be initialized; see [`init_tracing`].
pub async fn start_server(config: config::ApiConfig, state: ApiState) -> Result<()> {
    let app = router(Arc::new(state));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect::<Vec<_>>();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
            .allow_origin(allowed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|_: BoxError| async { StatusCode::REQUEST_TIMEOUT }))
            .timeout(Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
