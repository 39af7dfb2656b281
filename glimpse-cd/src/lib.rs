//! glimpse-cd library - Campus Dashboard service
//!
//! In-memory facility state and engagement model behind an HTTP API:
//! facility registry, crowd report feeds, beacon queues, the campus
//! contribution score, and the vision inference adapter.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod inference;
pub mod seed;
pub mod state;

use inference::VisionClient;
use state::SharedState;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Campus facility/feed/beacon/score state
    pub campus: Arc<SharedState>,
    /// External vision inference client
    pub vision: Arc<VisionClient>,
    /// Admin override secret (exact string equality, demo-grade gate)
    pub admin_secret: Arc<String>,
}

impl AppState {
    pub fn new(campus: SharedState, vision: VisionClient, admin_secret: &str) -> Self {
        Self {
            campus: Arc::new(campus),
            vision: Arc::new(vision),
            admin_secret: Arc::new(admin_secret.to_string()),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .merge(api::health::health_routes())
        // Facility registry
        .route("/api/facilities", get(api::facilities::list_facilities))
        .route("/api/facilities/:id", get(api::facilities::get_facility))
        // Crowd feed
        .route("/api/facilities/:id/reports", get(api::reports::list_reports))
        .route("/api/facilities/:id/reports", post(api::reports::submit_report))
        // Beacon queue
        .route("/api/facilities/:id/beacons", get(api::beacons::list_beacons))
        .route("/api/facilities/:id/beacons", post(api::beacons::open_beacon))
        .route(
            "/api/facilities/:id/beacons/:request_id/fulfill",
            post(api::beacons::fulfill_beacon),
        )
        // Contribution score
        .route("/api/score", get(api::score::get_score))
        // AI-assisted status update
        .route("/api/facilities/:id/analyze", post(api::analyze::analyze_facility))
        // Administrative override
        .route("/api/admin/facilities/:id", post(api::facilities::admin_update))
        // SSE event stream
        .route("/events", get(api::sse::event_stream))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
